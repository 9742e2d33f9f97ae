pub mod scheduler;
pub mod sink;

pub use scheduler::{is_due, AlertScheduler};
pub use sink::{AlertSink, TracingAlertSink};
