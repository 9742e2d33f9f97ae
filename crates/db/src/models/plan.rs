use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    Basic,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub name: String,
    pub price: f64,
    /// -1 means unlimited.
    pub max_contacts: i64,
    /// -1 means unlimited.
    pub max_opportunities: i64,
    pub features: PlanFeatures,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct PlanFeatures {
    #[serde(default)]
    pub expenses: bool,
    #[serde(default)]
    pub ai_assistant: bool,
    #[serde(default)]
    pub voice_commands: bool,
}

impl PlanConfig {
    pub const COLLECTION: &'static str = "plan_configs";

    /// The statically seeded tiers; written once on startup if the
    /// collection is empty, editable afterwards by admins.
    pub fn defaults() -> Vec<PlanConfig> {
        vec![
            PlanConfig {
                id: None,
                plan_type: PlanType::Basic,
                name: "Básico".to_string(),
                price: 29.90,
                max_contacts: 50,
                max_opportunities: 10,
                features: PlanFeatures {
                    expenses: false,
                    ai_assistant: false,
                    voice_commands: false,
                },
            },
            PlanConfig {
                id: None,
                plan_type: PlanType::Advanced,
                name: "Profissional".to_string(),
                price: 79.90,
                max_contacts: 500,
                max_opportunities: 100,
                features: PlanFeatures {
                    expenses: true,
                    ai_assistant: true,
                    voice_commands: false,
                },
            },
            PlanConfig {
                id: None,
                plan_type: PlanType::Expert,
                name: "Expert AI".to_string(),
                price: 149.90,
                max_contacts: -1,
                max_opportunities: -1,
                features: PlanFeatures {
                    expenses: true,
                    ai_assistant: true,
                    voice_commands: true,
                },
            },
        ]
    }
}
