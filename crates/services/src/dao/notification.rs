use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use fluxo_db::models::{AppNotification, NotificationKind};
use tracing::debug;

use super::base::{BaseDao, DaoResult};

/// Global retention cap; inserting past it evicts oldest-by-timestamp
/// entries until the store is back at the cap.
pub const MAX_STORED: u64 = 200;

pub struct NotificationDao {
    pub base: BaseDao<AppNotification>,
}

impl NotificationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, AppNotification::COLLECTION),
        }
    }

    /// Newest first.
    pub async fn list(&self, user_id: ObjectId) -> DaoResult<Vec<AppNotification>> {
        self.base
            .find_many(doc! { "user_id": user_id }, Some(doc! { "timestamp": -1 }))
            .await
    }

    pub async fn create(
        &self,
        user_id: ObjectId,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> DaoResult<AppNotification> {
        let notification = AppNotification {
            id: None,
            user_id,
            title: title.into(),
            message: message.into(),
            read: false,
            timestamp: DateTime::now(),
            kind,
        };

        let id = self.base.insert_one(&notification).await?;
        self.evict_past_cap().await?;
        self.base.find_by_id(id).await
    }

    async fn evict_past_cap(&self) -> DaoResult<()> {
        let total = self.base.count(doc! {}).await?;
        if total <= MAX_STORED {
            return Ok(());
        }

        let excess = (total - MAX_STORED) as i64;
        let oldest = self
            .base
            .find_many_limited(doc! {}, doc! { "timestamp": 1 }, excess)
            .await?;
        let ids: Vec<ObjectId> = oldest.iter().filter_map(|n| n.id).collect();
        let evicted = self
            .base
            .hard_delete(doc! { "_id": { "$in": ids } })
            .await?;
        debug!(evicted, "Evicted oldest notifications past retention cap");
        Ok(())
    }

    pub async fn mark_read(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_one(
                doc! { "_id": id, "user_id": user_id },
                doc! { "$set": { "read": true } },
            )
            .await
    }

    pub async fn mark_all_read(&self, user_id: ObjectId) -> DaoResult<u64> {
        self.base
            .update_many(
                doc! { "user_id": user_id, "read": false },
                doc! { "$set": { "read": true } },
            )
            .await
    }
}
