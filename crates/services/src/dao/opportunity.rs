use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use fluxo_db::models::{
    Activity, Expense, ExpenseKind, NotificationKind, Opportunity, OpportunityStatus,
};
use tracing::{debug, info};

use super::base::{BaseDao, DaoError, DaoResult};
use super::notification::NotificationDao;

pub struct OpportunityDao {
    pub base: BaseDao<Opportunity>,
    activities: BaseDao<Activity>,
    expenses: BaseDao<Expense>,
    notifications: NotificationDao,
}

impl OpportunityDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Opportunity::COLLECTION),
            activities: BaseDao::new(db, Activity::COLLECTION),
            expenses: BaseDao::new(db, Expense::COLLECTION),
            notifications: NotificationDao::new(db),
        }
    }

    pub async fn list(&self, user_id: ObjectId) -> DaoResult<Vec<Opportunity>> {
        self.base
            .find_many(doc! { "user_id": user_id }, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn get(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<Opportunity> {
        self.base.find_by_id_for_user(user_id, id).await
    }

    pub async fn count(&self, user_id: ObjectId) -> DaoResult<u64> {
        self.base.count(doc! { "user_id": user_id }).await
    }

    /// Upsert with the two derived writes: entering Won synthesizes one
    /// income record, and every status change persists a notification for
    /// the owner. Re-saving an already-Won opportunity produces neither.
    pub async fn save(&self, mut opportunity: Opportunity) -> DaoResult<Opportunity> {
        if opportunity.value < 0.0 {
            return Err(DaoError::Validation(
                "Opportunity value must not be negative".to_string(),
            ));
        }

        let previous = match opportunity.id {
            Some(id) => self.base.find_one(doc! { "_id": id }).await?,
            None => None,
        };
        let previous_status = previous.as_ref().map(|p| p.status);

        opportunity.updated_at = DateTime::now();
        let saved = match opportunity.id {
            Some(id) => {
                self.base.save(id, &opportunity).await?;
                opportunity
            }
            None => {
                let id = self.base.insert_one(&opportunity).await?;
                self.base.find_by_id(id).await?
            }
        };

        if previous_status != Some(OpportunityStatus::Won)
            && saved.status == OpportunityStatus::Won
        {
            self.record_won_income(&saved).await?;
        }

        if let Some(prev) = previous_status {
            if prev != saved.status {
                self.notifications
                    .create(
                        saved.user_id,
                        "Oportunidade atualizada",
                        format!("\"{}\" mudou para {}", saved.product, saved.status.label()),
                        NotificationKind::Opportunity,
                    )
                    .await?;
            }
        }

        Ok(saved)
    }

    async fn record_won_income(&self, opportunity: &Opportunity) -> DaoResult<()> {
        let income = Expense {
            id: None,
            user_id: opportunity.user_id,
            description: format!(
                "Venda: {} - {}",
                opportunity.product, opportunity.contact_name
            ),
            amount: opportunity.value,
            category: "Vendas".to_string(),
            date: DateTime::now(),
            kind: ExpenseKind::Income,
        };
        self.expenses.insert_one(&income).await?;
        info!(
            opportunity_id = ?opportunity.id,
            value = opportunity.value,
            "Recorded income for won opportunity"
        );
        Ok(())
    }

    /// Activities referencing the opportunity are unlinked (reference
    /// cleared), not deleted.
    pub async fn delete(&self, user_id: ObjectId, id: ObjectId) -> DaoResult<()> {
        self.base.find_by_id_for_user(user_id, id).await?;
        self.base.delete_by_id(id).await?;

        let unlinked = self
            .activities
            .update_many(
                doc! { "opportunity_id": id },
                doc! { "$unset": { "opportunity_id": "" } },
            )
            .await?;
        debug!(opportunity_id = %id, unlinked, "Unlinked activities from deleted opportunity");
        Ok(())
    }
}
