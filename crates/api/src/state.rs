use std::sync::Arc;
use std::time::Duration;

use fluxo_config::Settings;
use fluxo_db::models::{PlanConfig, User};
use fluxo_services::{
    AlertScheduler, AssistantService, AuthService, ExportService,
    alerts::TracingAlertSink,
    dao::{
        ActivityDao, BotConfigDao, ContactDao, ExpenseDao, NotificationDao, OpportunityDao,
        PlanDao, SettingsDao, UserDao,
    },
};
use mongodb::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserDao>,
    pub plans: Arc<PlanDao>,
    pub contacts: Arc<ContactDao>,
    pub opportunities: Arc<OpportunityDao>,
    pub expenses: Arc<ExpenseDao>,
    pub activities: Arc<ActivityDao>,
    pub notifications: Arc<NotificationDao>,
    pub user_settings: Arc<SettingsDao>,
    pub bots: Arc<BotConfigDao>,
    pub export: Arc<ExportService>,
    pub assistant: Arc<AssistantService>,
    pub scheduler: Arc<AlertScheduler>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let users = Arc::new(UserDao::new(&db));
        let plans = Arc::new(PlanDao::new(&db));
        let contacts = Arc::new(ContactDao::new(&db));
        let opportunities = Arc::new(OpportunityDao::new(&db));
        let expenses = Arc::new(ExpenseDao::new(&db));
        let activities = Arc::new(ActivityDao::new(&db));
        let notifications = Arc::new(NotificationDao::new(&db));
        let user_settings = Arc::new(SettingsDao::new(&db));
        let bots = Arc::new(BotConfigDao::new(&db));
        let export = Arc::new(ExportService::new(&db));
        let assistant = Arc::new(AssistantService::new(&db, settings.gemini.clone()));
        let scheduler = Arc::new(AlertScheduler::new(
            &db,
            Arc::new(TracingAlertSink),
            Duration::from_secs(settings.alerts.poll_interval_secs),
        ));

        Self {
            db,
            settings,
            auth,
            users,
            plans,
            contacts,
            opportunities,
            expenses,
            activities,
            notifications,
            user_settings,
            bots,
            export,
            assistant,
            scheduler,
        }
    }

    /// The persisted plan config backing a user's tier (with fallback
    /// to Basic handled by the DAO).
    pub async fn plan_for(&self, user: &User) -> Result<PlanConfig, fluxo_services::dao::DaoError> {
        self.plans.get(user.plan).await
    }
}
