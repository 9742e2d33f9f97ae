use bson::{oid::ObjectId, DateTime};
use mongodb::Database;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use fluxo_db::models::{Contact, Expense, ExpenseKind, Opportunity, OpportunityStatus};

use crate::dao::{ContactDao, DaoResult, ExpenseDao, OpportunityDao};

use super::gemini::FunctionDeclaration;

/// Pages the `navigate` tool may route to.
pub const NAVIGATION_PAGES: &[&str] = &[
    "dashboard",
    "contacts",
    "opportunities",
    "expenses",
    "activities",
    "admin",
];

/// The closed set of actions the model may request. Anything outside it
/// is rejected by name, never dispatched dynamically.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Navigate {
        page: String,
    },
    CreateExpense {
        description: String,
        amount: f64,
        category: Option<String>,
    },
    CreateIncome {
        description: String,
        amount: f64,
        category: Option<String>,
    },
    CreateLead {
        name: String,
        phone: Option<String>,
        interest: String,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ToolParseError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("missing argument: {0}")]
    MissingArg(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArg(&'static str),
}

fn get_str(args: &Value, key: &'static str) -> Result<String, ToolParseError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or(ToolParseError::MissingArg(key))
}

fn get_str_opt(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Amounts arrive either as JSON numbers or numeric strings; both coerce.
fn get_amount(args: &Value, key: &'static str) -> Result<f64, ToolParseError> {
    let value = args.get(key).ok_or(ToolParseError::MissingArg(key))?;
    match value {
        Value::Number(n) => n.as_f64().ok_or(ToolParseError::InvalidArg(key)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ToolParseError::InvalidArg(key)),
        _ => Err(ToolParseError::InvalidArg(key)),
    }
}

impl ToolCall {
    pub fn parse(name: &str, args: &Value) -> Result<ToolCall, ToolParseError> {
        match name {
            "navigate" => Ok(ToolCall::Navigate {
                page: get_str(args, "page")?.to_lowercase(),
            }),
            "create_expense" => Ok(ToolCall::CreateExpense {
                description: get_str(args, "description")?,
                amount: get_amount(args, "amount")?,
                category: get_str_opt(args, "category"),
            }),
            "create_income" => Ok(ToolCall::CreateIncome {
                description: get_str(args, "description")?,
                amount: get_amount(args, "amount")?,
                category: get_str_opt(args, "category"),
            }),
            "create_lead" => Ok(ToolCall::CreateLead {
                name: get_str(args, "name")?,
                phone: get_str_opt(args, "phone"),
                interest: get_str(args, "interest")?,
            }),
            other => Err(ToolParseError::UnknownTool(other.to_string())),
        }
    }
}

/// What a tool execution hands back: the confirmation text fed to the
/// model, plus a route hint the client applies when navigation happened.
#[derive(Debug, Clone)]
pub struct ToolReply {
    pub message: String,
    pub navigate_to: Option<String>,
}

impl ToolReply {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            navigate_to: None,
        }
    }
}

/// Executes parsed tool calls against the record store. Failures are
/// always folded into a user-facing reply string; nothing propagates
/// back into the model call chain.
pub struct ToolRouter {
    expenses: ExpenseDao,
    contacts: ContactDao,
    opportunities: OpportunityDao,
}

impl ToolRouter {
    pub fn new(db: &Database) -> Self {
        Self {
            expenses: ExpenseDao::new(db),
            contacts: ContactDao::new(db),
            opportunities: OpportunityDao::new(db),
        }
    }

    pub async fn execute(&self, user_id: ObjectId, name: &str, args: &Value) -> ToolReply {
        debug!(tool = name, %user_id, "Executing tool call");
        match ToolCall::parse(name, args) {
            Ok(call) => match self.dispatch(user_id, call).await {
                Ok(reply) => reply,
                Err(error) => {
                    warn!(tool = name, %error, "Tool execution failed");
                    ToolReply::text("Ocorreu um erro ao processar essa ação no banco de dados.")
                }
            },
            Err(ToolParseError::UnknownTool(_)) => ToolReply::text("Ferramenta desconhecida."),
            Err(error) => ToolReply::text(format!("Erro: {error}.")),
        }
    }

    async fn dispatch(&self, user_id: ObjectId, call: ToolCall) -> DaoResult<ToolReply> {
        match call {
            ToolCall::Navigate { page } => Ok(self.navigate(&page)),
            ToolCall::CreateExpense {
                description,
                amount,
                category,
            } => {
                self.record_entry(
                    user_id,
                    &description,
                    amount,
                    category.unwrap_or_else(|| "Geral".to_string()),
                    ExpenseKind::Expense,
                )
                .await?;
                Ok(ToolReply::text(format!(
                    "✅ Despesa registrada: \"{description}\" no valor de R$ {amount}."
                )))
            }
            ToolCall::CreateIncome {
                description,
                amount,
                category,
            } => {
                self.record_entry(
                    user_id,
                    &description,
                    amount,
                    category.unwrap_or_else(|| "Vendas".to_string()),
                    ExpenseKind::Income,
                )
                .await?;
                Ok(ToolReply::text(format!(
                    "💰 Receita registrada: \"{description}\" no valor de R$ {amount}."
                )))
            }
            ToolCall::CreateLead {
                name,
                phone,
                interest,
            } => self.create_lead(user_id, name, phone, interest).await,
        }
    }

    fn navigate(&self, page: &str) -> ToolReply {
        if NAVIGATION_PAGES.contains(&page) {
            ToolReply {
                message: format!("Navegando para a página {page}..."),
                navigate_to: Some(page.to_string()),
            }
        } else {
            ToolReply::text(format!(
                "Página {page} não encontrada. Tente: dashboard, contatos, financeiro."
            ))
        }
    }

    async fn record_entry(
        &self,
        user_id: ObjectId,
        description: &str,
        amount: f64,
        category: String,
        kind: ExpenseKind,
    ) -> DaoResult<()> {
        self.expenses
            .save(Expense {
                id: None,
                user_id,
                description: description.to_string(),
                amount,
                category,
                date: DateTime::now(),
                kind,
            })
            .await?;
        Ok(())
    }

    /// One logical step: a contact plus an open zero-value opportunity.
    async fn create_lead(
        &self,
        user_id: ObjectId,
        name: String,
        phone: Option<String>,
        interest: String,
    ) -> DaoResult<ToolReply> {
        let now = DateTime::now();
        let contact = self
            .contacts
            .save(Contact {
                id: None,
                user_id,
                name: name.clone(),
                company: String::new(),
                email: String::new(),
                phone: phone.unwrap_or_default(),
                address: None,
                last_interaction: now,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.opportunities
            .save(Opportunity {
                id: None,
                user_id,
                contact_id: contact.id.ok_or(crate::dao::DaoError::NotFound)?,
                contact_name: contact.name.clone(),
                product: interest.clone(),
                value: 0.0,
                status: OpportunityStatus::Open,
                created_at: now,
                updated_at: now,
            })
            .await?;

        Ok(ToolReply::text(format!(
            "📇 Lead criado: \"{name}\" com interesse em \"{interest}\"."
        )))
    }
}

/// Schemas advertised to the model. The lead tool only exists in the
/// WhatsApp-bot conversation.
pub fn declarations(include_lead: bool) -> Vec<FunctionDeclaration> {
    let mut decls = vec![
        FunctionDeclaration {
            name: "navigate".to_string(),
            description: "Navigate to a specific page in the application".to_string(),
            parameters: serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "page": {
                        "type": "STRING",
                        "description": "The page to navigate to. Options: \"dashboard\", \"contacts\", \"opportunities\", \"expenses\", \"activities\"",
                    },
                },
                "required": ["page"],
            }),
        },
        FunctionDeclaration {
            name: "create_expense".to_string(),
            description: "Record a new personal expense".to_string(),
            parameters: serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "description": { "type": "STRING", "description": "What was purchased (e.g., \"Lunch\")" },
                    "amount": { "type": "NUMBER", "description": "The numeric cost amount" },
                    "category": { "type": "STRING", "description": "Category (e.g., Food, Transport, Office)" },
                },
                "required": ["description", "amount"],
            }),
        },
        FunctionDeclaration {
            name: "create_income".to_string(),
            description: "Record a new income entry".to_string(),
            parameters: serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "description": { "type": "STRING", "description": "Source of the income" },
                    "amount": { "type": "NUMBER", "description": "The numeric amount received" },
                    "category": { "type": "STRING", "description": "Category (defaults to Vendas)" },
                },
                "required": ["description", "amount"],
            }),
        },
    ];

    if include_lead {
        decls.push(FunctionDeclaration {
            name: "create_lead".to_string(),
            description: "Register an interested customer as a contact with an open opportunity"
                .to_string(),
            parameters: serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Customer name" },
                    "phone": { "type": "STRING", "description": "Customer phone number" },
                    "interest": { "type": "STRING", "description": "Product or service of interest" },
                },
                "required": ["name", "interest"],
            }),
        });
    }

    decls
}
