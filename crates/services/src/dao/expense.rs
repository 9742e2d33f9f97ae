use bson::{doc, oid::ObjectId};
use mongodb::Database;
use fluxo_db::models::Expense;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct ExpenseDao {
    pub base: BaseDao<Expense>,
}

impl ExpenseDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Expense::COLLECTION),
        }
    }

    pub async fn list(&self, user_id: ObjectId) -> DaoResult<Vec<Expense>> {
        self.base
            .find_many(doc! { "user_id": user_id }, Some(doc! { "date": -1 }))
            .await
    }

    pub async fn get(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<Expense> {
        self.base.find_by_id_for_user(user_id, id).await
    }

    pub async fn save(&self, expense: Expense) -> DaoResult<Expense> {
        if expense.amount < 0.0 {
            return Err(DaoError::Validation(
                "Amount must not be negative".to_string(),
            ));
        }
        match expense.id {
            Some(id) => {
                self.base.save(id, &expense).await?;
                Ok(expense)
            }
            None => {
                let id = self.base.insert_one(&expense).await?;
                self.base.find_by_id(id).await
            }
        }
    }

    pub async fn delete(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<()> {
        self.base.find_by_id_for_user(user_id, id).await?;
        self.base.delete_by_id(id).await?;
        Ok(())
    }
}
