use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use fluxo_db::models::{Contact, Opportunity};
use tracing::debug;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct ContactDao {
    pub base: BaseDao<Contact>,
    opportunities: BaseDao<Opportunity>,
}

impl ContactDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Contact::COLLECTION),
            opportunities: BaseDao::new(db, Opportunity::COLLECTION),
        }
    }

    pub async fn list(&self, user_id: ObjectId) -> DaoResult<Vec<Contact>> {
        self.base
            .find_many(doc! { "user_id": user_id }, Some(doc! { "name": 1 }))
            .await
    }

    pub async fn get(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<Contact> {
        self.base.find_by_id_for_user(user_id, id).await
    }

    pub async fn count(&self, user_id: ObjectId) -> DaoResult<u64> {
        self.base.count(doc! { "user_id": user_id }).await
    }

    pub async fn save(&self, mut contact: Contact) -> DaoResult<Contact> {
        if contact.name.trim().is_empty() {
            return Err(DaoError::Validation("Contact name is required".to_string()));
        }
        contact.updated_at = DateTime::now();
        match contact.id {
            Some(id) => {
                self.base.save(id, &contact).await?;
                Ok(contact)
            }
            None => {
                let id = self.base.insert_one(&contact).await?;
                self.base.find_by_id(id).await
            }
        }
    }

    /// Contacts are a dependency root: deleting one hard-deletes every
    /// opportunity that references it.
    pub async fn delete(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<()> {
        self.base.find_by_id_for_user(user_id, id).await?;
        self.base.delete_by_id(id).await?;

        let removed = self
            .opportunities
            .hard_delete(doc! { "contact_id": id })
            .await?;
        debug!(contact_id = %id, removed, "Cascade-deleted opportunities for contact");
        Ok(())
    }
}
