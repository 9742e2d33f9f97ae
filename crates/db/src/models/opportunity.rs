use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub contact_id: ObjectId,
    /// Snapshot of the contact's name taken when the opportunity is
    /// created. Stays as-is if the contact is later renamed.
    pub contact_name: String,
    pub product: String,
    pub value: f64,
    pub status: OpportunityStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    Open,
    Negotiation,
    Won,
    Lost,
}

impl OpportunityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OpportunityStatus::Open => "Aberta",
            OpportunityStatus::Negotiation => "Em Negociação",
            OpportunityStatus::Won => "Fechada (Ganho)",
            OpportunityStatus::Lost => "Perdida",
        }
    }
}

impl Opportunity {
    pub const COLLECTION: &'static str = "opportunities";
}
