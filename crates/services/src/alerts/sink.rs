use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::info;

/// Transport for the platform-level transient alert. The browser
/// Notification API has no server counterpart, so delivery is a seam a
/// client transport plugs into; absence of one degrades to a log line.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn alert(&self, user_id: ObjectId, title: &str, body: &str);
}

pub struct TracingAlertSink;

#[async_trait]
impl AlertSink for TracingAlertSink {
    async fn alert(&self, user_id: ObjectId, title: &str, body: &str) {
        info!(%user_id, title, body, "Activity alert");
    }
}
