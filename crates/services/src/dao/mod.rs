pub mod activity;
pub mod base;
pub mod bot;
pub mod contact;
pub mod expense;
pub mod notification;
pub mod opportunity;
pub mod plan;
pub mod settings;
pub mod user;

pub use activity::ActivityDao;
pub use base::{BaseDao, DaoError, DaoResult};
pub use bot::BotConfigDao;
pub use contact::ContactDao;
pub use expense::ExpenseDao;
pub use notification::NotificationDao;
pub use opportunity::OpportunityDao;
pub use plan::PlanDao;
pub use settings::SettingsDao;
pub use user::UserDao;
