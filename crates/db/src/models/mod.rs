pub mod activity;
pub mod bot;
pub mod contact;
pub mod expense;
pub mod notification;
pub mod opportunity;
pub mod plan;
pub mod settings;
pub mod user;

pub use activity::Activity;
pub use bot::BotConfig;
pub use contact::Contact;
pub use expense::{Expense, ExpenseKind};
pub use notification::{AppNotification, NotificationKind};
pub use opportunity::{Opportunity, OpportunityStatus};
pub use plan::{PlanConfig, PlanFeatures, PlanType};
pub use settings::UserSettings;
pub use user::{User, UserRole};
