pub mod access;
pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod dao;
pub mod export;

pub use alerts::AlertScheduler;
pub use assistant::AssistantService;
pub use auth::AuthService;
pub use dao::*;
pub use export::ExportService;
