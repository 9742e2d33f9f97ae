use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use fluxo_db::models::BotConfig;

use super::base::{BaseDao, DaoResult};

pub struct BotConfigDao {
    pub base: BaseDao<BotConfig>,
}

impl BotConfigDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, BotConfig::COLLECTION),
        }
    }

    pub async fn get(&self, user_id: ObjectId) -> DaoResult<BotConfig> {
        Ok(self
            .base
            .find_one(doc! { "user_id": user_id })
            .await?
            .unwrap_or_else(|| BotConfig::for_user(user_id)))
    }

    pub async fn save(&self, config: BotConfig) -> DaoResult<BotConfig> {
        self.base
            .save_where(doc! { "user_id": config.user_id }, &config)
            .await?;
        self.get(config.user_id).await
    }

    /// Simulated pairing flow: connecting stamps the connection time.
    pub async fn set_connected(&self, user_id: ObjectId, connected: bool) -> DaoResult<BotConfig> {
        let mut config = self.get(user_id).await?;
        config.is_connected = connected;
        if connected {
            config.last_connection = Some(DateTime::now());
        }
        self.save(config).await
    }
}
