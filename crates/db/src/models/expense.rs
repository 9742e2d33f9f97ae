use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTime,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseKind {
    Income,
    Expense,
}

impl Expense {
    pub const COLLECTION: &'static str = "expenses";
}
