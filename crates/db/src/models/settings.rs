use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub notifications_enabled: bool,
    #[serde(default = "default_alert_minutes")]
    pub activity_alert_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
}

fn default_alert_minutes() -> i64 {
    15
}

impl UserSettings {
    pub const COLLECTION: &'static str = "user_settings";

    /// Defaults handed out when a user has no stored settings row yet.
    pub fn for_user(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            notifications_enabled: false,
            activity_alert_minutes: default_alert_minutes(),
            google_api_key: None,
        }
    }
}
