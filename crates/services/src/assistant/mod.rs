pub mod bot;
pub mod gemini;
pub mod tools;

use bson::oid::ObjectId;
use mongodb::Database;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fluxo_config::GeminiSettings;

pub use gemini::{AssistantError, Content, GeminiClient, InlineData, Part, ToolDecl};
pub use tools::{ToolReply, ToolRouter, NAVIGATION_PAGES};

/// One prior turn of a conversation, as the client stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}

/// Orchestrates model calls and tool execution for both the in-app
/// assistant and the WhatsApp bot simulator.
pub struct AssistantService {
    gemini: GeminiClient,
    router: ToolRouter,
}

impl AssistantService {
    pub fn new(db: &Database, settings: GeminiSettings) -> Self {
        Self {
            gemini: GeminiClient::new(settings),
            router: ToolRouter::new(db),
        }
    }

    pub fn is_available(&self, user_key: Option<&str>) -> bool {
        self.gemini.is_available(user_key)
    }

    /// Runs one conversational exchange with at most one tool round:
    /// model answers, any requested tool calls are executed, their
    /// results are sent back once, and the follow-up text is returned.
    pub async fn chat(
        &self,
        user_id: ObjectId,
        user_key: Option<&str>,
        system_instruction: &str,
        history: &[ChatTurn],
        message: &str,
        include_lead_tool: bool,
    ) -> Result<AssistantReply, AssistantError> {
        let tools = vec![ToolDecl {
            function_declarations: tools::declarations(include_lead_tool),
        }];

        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(turn.role.as_str(), turn.text.clone()))
            .collect();
        contents.push(Content::user(vec![Part::text(message)]));

        let parts = self
            .gemini
            .generate(user_key, Some(system_instruction), &contents, Some(&tools))
            .await?;

        let calls: Vec<_> = parts
            .iter()
            .filter_map(|p| p.function_call.clone())
            .collect();

        if calls.is_empty() {
            let text = collect_text(&parts)
                .unwrap_or_else(|| "Não entendi, pode repetir?".to_string());
            return Ok(AssistantReply {
                text,
                navigate_to: None,
            });
        }

        debug!(calls = calls.len(), %user_id, "Model requested tool calls");
        let mut navigate_to = None;
        let mut response_parts = Vec::with_capacity(calls.len());
        for call in &calls {
            let reply = self.router.execute(user_id, &call.name, &call.args).await;
            if reply.navigate_to.is_some() {
                navigate_to = reply.navigate_to.clone();
            }
            response_parts.push(Part::function_response(call.name.clone(), reply.message));
        }

        // The model must see both its own call and the tool results.
        contents.push(Content::model(parts));
        contents.push(Content::user(response_parts));

        let final_parts = self
            .gemini
            .generate(user_key, Some(system_instruction), &contents, Some(&tools))
            .await?;
        let text = collect_text(&final_parts).unwrap_or_else(|| "Ação realizada.".to_string());

        Ok(AssistantReply { text, navigate_to })
    }

    pub async fn generate_image(
        &self,
        user_key: Option<&str>,
        prompt: &str,
    ) -> Result<InlineData, AssistantError> {
        self.gemini.generate_image(user_key, prompt).await
    }
}

fn collect_text(parts: &[Part]) -> Option<String> {
    let text: String = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
