use bson::{doc, oid::ObjectId};
use mongodb::Database;
use fluxo_db::models::Activity;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct ActivityDao {
    pub base: BaseDao<Activity>,
}

impl ActivityDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Activity::COLLECTION),
        }
    }

    pub async fn list(&self, user_id: ObjectId) -> DaoResult<Vec<Activity>> {
        self.base
            .find_many(doc! { "user_id": user_id }, Some(doc! { "date": 1 }))
            .await
    }

    pub async fn get(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<Activity> {
        self.base.find_by_id_for_user(user_id, id).await
    }

    /// Open activities the scheduler still has to look at: not completed
    /// and never alerted.
    pub async fn pending_alerts(&self, user_id: ObjectId) -> DaoResult<Vec<Activity>> {
        self.base
            .find_many(
                doc! {
                    "user_id": user_id,
                    "completed": false,
                    "notified": { "$ne": true },
                },
                Some(doc! { "date": 1 }),
            )
            .await
    }

    pub async fn save(&self, activity: Activity) -> DaoResult<Activity> {
        if activity.title.trim().is_empty() {
            return Err(DaoError::Validation("Activity title is required".to_string()));
        }
        match activity.id {
            Some(id) => {
                self.base.save(id, &activity).await?;
                Ok(activity)
            }
            None => {
                let id = self.base.insert_one(&activity).await?;
                self.base.find_by_id(id).await
            }
        }
    }

    /// One-way flag; never cleared once set.
    pub async fn mark_notified(&self, id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_by_id(id, doc! { "$set": { "notified": true } })
            .await
    }

    pub async fn delete(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<()> {
        self.base.find_by_id_for_user(user_id, id).await?;
        self.base.delete_by_id(id).await?;
        Ok(())
    }
}
