use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default)]
    pub bot_name: String,
    pub business_description: Option<String>,
    pub products_and_prices: Option<String>,
    pub operating_hours: Option<String>,
    pub communication_tone: Option<String>,
    #[serde(default)]
    pub system_instructions: String,
    #[serde(default)]
    pub is_connected: bool,
    pub last_connection: Option<DateTime>,
}

impl BotConfig {
    pub const COLLECTION: &'static str = "bot_configs";

    /// Lazily created defaults for users who never configured a bot.
    pub fn for_user(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            whatsapp_number: String::new(),
            bot_name: String::new(),
            business_description: None,
            products_and_prices: None,
            operating_hours: None,
            communication_tone: None,
            system_instructions: String::new(),
            is_connected: false,
            last_connection: None,
        }
    }
}
