use bson::{doc, oid::ObjectId};
use mongodb::Database;
use fluxo_db::models::UserSettings;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct SettingsDao {
    pub base: BaseDao<UserSettings>,
}

impl SettingsDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, UserSettings::COLLECTION),
        }
    }

    /// Users without a stored row get defaults; nothing is persisted
    /// until the first save.
    pub async fn get(&self, user_id: ObjectId) -> DaoResult<UserSettings> {
        Ok(self
            .base
            .find_one(doc! { "user_id": user_id })
            .await?
            .unwrap_or_else(|| UserSettings::for_user(user_id)))
    }

    pub async fn save(&self, settings: UserSettings) -> DaoResult<UserSettings> {
        if settings.activity_alert_minutes <= 0 {
            return Err(DaoError::Validation(
                "Alert window must be positive".to_string(),
            ));
        }
        self.base
            .save_where(doc! { "user_id": settings.user_id }, &settings)
            .await?;
        self.get(settings.user_id).await
    }
}
