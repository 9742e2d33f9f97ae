use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub opportunity_id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub date: DateTime,
    #[serde(default)]
    pub completed: bool,
    /// Set once by the alert scheduler; never transitions back to false.
    #[serde(default)]
    pub notified: bool,
}

impl Activity {
    pub const COLLECTION: &'static str = "activities";
}
