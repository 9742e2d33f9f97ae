use bson::doc;
use mongodb::Database;
use fluxo_db::models::{PlanConfig, PlanType};
use tracing::info;

use super::base::{BaseDao, DaoResult};

pub struct PlanDao {
    pub base: BaseDao<PlanConfig>,
}

impl PlanDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, PlanConfig::COLLECTION),
        }
    }

    /// Writes the default tiers on first startup; existing configs
    /// (including admin edits) are left untouched.
    pub async fn ensure_seeded(&self) -> DaoResult<()> {
        if self.base.count(doc! {}).await? > 0 {
            return Ok(());
        }
        for plan in PlanConfig::defaults() {
            self.base.insert_one(&plan).await?;
        }
        info!("Seeded default plan configs");
        Ok(())
    }

    pub async fn all(&self) -> DaoResult<Vec<PlanConfig>> {
        self.base.find_many(doc! {}, Some(doc! { "price": 1 })).await
    }

    /// Unknown or missing plan types fall back to the Basic tier so
    /// callers always get a usable config.
    pub async fn get(&self, plan_type: PlanType) -> DaoResult<PlanConfig> {
        if let Some(config) = self
            .base
            .find_one(doc! { "type": bson::to_bson(&plan_type)? })
            .await?
        {
            return Ok(config);
        }

        if let Some(basic) = self
            .base
            .find_one(doc! { "type": bson::to_bson(&PlanType::Basic)? })
            .await?
        {
            return Ok(basic);
        }

        Ok(PlanConfig::defaults().remove(0))
    }

    pub async fn save(&self, config: PlanConfig) -> DaoResult<()> {
        self.base
            .save_where(doc! { "type": bson::to_bson(&config.plan_type)? }, &config)
            .await
    }
}
