use bson::doc;
use mongodb::Database;
use serde::{Deserialize, Serialize};
use tracing::info;

use fluxo_db::models::{
    Activity, AppNotification, BotConfig, Contact, Expense, Opportunity, PlanConfig, User,
    UserSettings,
};

use crate::dao::{BaseDao, DaoError, DaoResult};

/// Full database snapshot, one array per collection. The same shape is
/// accepted back on import.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatabaseExport {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub plan_configs: Vec<PlanConfig>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub notifications: Vec<AppNotification>,
    #[serde(default)]
    pub user_settings: Vec<UserSettings>,
    #[serde(default)]
    pub bot_configs: Vec<BotConfig>,
}

/// Admin backup and restore across every collection. Import merges by
/// id rather than wiping, so restoring an old snapshot never deletes
/// records created since.
pub struct ExportService {
    users: BaseDao<User>,
    plans: BaseDao<PlanConfig>,
    contacts: BaseDao<Contact>,
    opportunities: BaseDao<Opportunity>,
    expenses: BaseDao<Expense>,
    activities: BaseDao<Activity>,
    notifications: BaseDao<AppNotification>,
    settings: BaseDao<UserSettings>,
    bots: BaseDao<BotConfig>,
}

impl ExportService {
    pub fn new(db: &Database) -> Self {
        Self {
            users: BaseDao::new(db, User::COLLECTION),
            plans: BaseDao::new(db, PlanConfig::COLLECTION),
            contacts: BaseDao::new(db, Contact::COLLECTION),
            opportunities: BaseDao::new(db, Opportunity::COLLECTION),
            expenses: BaseDao::new(db, Expense::COLLECTION),
            activities: BaseDao::new(db, Activity::COLLECTION),
            notifications: BaseDao::new(db, AppNotification::COLLECTION),
            settings: BaseDao::new(db, UserSettings::COLLECTION),
            bots: BaseDao::new(db, BotConfig::COLLECTION),
        }
    }

    pub async fn export_all(&self) -> DaoResult<DatabaseExport> {
        let export = DatabaseExport {
            users: self.users.find_many(doc! {}, None).await?,
            plan_configs: self.plans.find_many(doc! {}, None).await?,
            contacts: self.contacts.find_many(doc! {}, None).await?,
            opportunities: self.opportunities.find_many(doc! {}, None).await?,
            expenses: self.expenses.find_many(doc! {}, None).await?,
            activities: self.activities.find_many(doc! {}, None).await?,
            notifications: self.notifications.find_many(doc! {}, None).await?,
            user_settings: self.settings.find_many(doc! {}, None).await?,
            bot_configs: self.bots.find_many(doc! {}, None).await?,
        };
        info!(
            users = export.users.len(),
            contacts = export.contacts.len(),
            opportunities = export.opportunities.len(),
            "Database exported"
        );
        Ok(export)
    }

    pub async fn import(&self, export: DatabaseExport) -> DaoResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        summary.users = upsert_all(&self.users, export.users).await?;
        for plan in export.plan_configs {
            let type_bson = bson::to_bson(&plan.plan_type)?;
            self.plans
                .save_where(doc! { "type": type_bson }, &plan)
                .await?;
            summary.plan_configs += 1;
        }
        summary.contacts = upsert_all(&self.contacts, export.contacts).await?;
        summary.opportunities = upsert_all(&self.opportunities, export.opportunities).await?;
        summary.expenses = upsert_all(&self.expenses, export.expenses).await?;
        summary.activities = upsert_all(&self.activities, export.activities).await?;
        summary.notifications = upsert_all(&self.notifications, export.notifications).await?;

        // One-row-per-user collections are keyed by owner, not by _id.
        for settings in export.user_settings {
            self.settings
                .save_where(doc! { "user_id": settings.user_id }, &settings)
                .await?;
            summary.user_settings += 1;
        }
        for bot in export.bot_configs {
            self.bots
                .save_where(doc! { "user_id": bot.user_id }, &bot)
                .await?;
            summary.bot_configs += 1;
        }

        info!(
            users = summary.users,
            contacts = summary.contacts,
            "Database import applied"
        );
        Ok(summary)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub users: u64,
    pub plan_configs: u64,
    pub contacts: u64,
    pub opportunities: u64,
    pub expenses: u64,
    pub activities: u64,
    pub notifications: u64,
    pub user_settings: u64,
    pub bot_configs: u64,
}

trait HasId {
    fn entity_id(&self) -> Option<bson::oid::ObjectId>;
}

macro_rules! has_id {
    ($($ty:ty),+ $(,)?) => {
        $(impl HasId for $ty {
            fn entity_id(&self) -> Option<bson::oid::ObjectId> {
                self.id
            }
        })+
    };
}

has_id!(User, Contact, Opportunity, Expense, Activity, AppNotification);

async fn upsert_all<T>(dao: &BaseDao<T>, entities: Vec<T>) -> DaoResult<u64>
where
    T: HasId + Serialize + for<'de> Deserialize<'de> + Unpin + Send + Sync,
{
    let mut applied = 0;
    for entity in entities {
        let id = entity
            .entity_id()
            .ok_or_else(|| DaoError::Validation("import record missing _id".to_string()))?;
        dao.save(id, &entity).await?;
        applied += 1;
    }
    Ok(applied)
}
