use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub last_interaction: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Contact {
    pub const COLLECTION: &'static str = "contacts";
}
