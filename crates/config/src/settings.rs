use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub gemini: GeminiSettings,
    pub alerts: AlertSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub issuer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    /// Server-level fallback key; a per-user key in UserSettings takes precedence.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub image_model: String,
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertSettings {
    pub poll_interval_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("FLUXO"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "fluxo")?
            .set_default("database.max_pool_size", None::<i64>)?
            .set_default("database.min_pool_size", None::<i64>)?
            .set_default("jwt.secret", "change-me-in-production")?
            .set_default("jwt.access_token_ttl_secs", 3600)?
            .set_default("jwt.refresh_token_ttl_secs", 604800)?
            .set_default("jwt.issuer", "fluxo")?
            .set_default("gemini.api_key", None::<String>)?
            .set_default(
                "gemini.api_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.model", "gemini-2.5-flash")?
            .set_default("gemini.image_model", "imagen-3.0-generate-002")?
            .set_default("gemini.max_output_tokens", 2048)?
            .set_default("alerts.poll_interval_secs", 60)?
            .build()?;

        config.try_deserialize()
    }
}
