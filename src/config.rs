//! Service configuration, read from the environment.
use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

use crate::gateway::DEFAULT_SYSTEM_PROMPT;
use crate::llm::openai::{OpenAiModel, DEFAULT_BASE_URL};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://chatbot.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Everything `main` needs to start the service.
#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_model: OpenAiModel,
    pub openai_base_url: String,
    pub system_prompt: String,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"<redacted>")
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("system_prompt", &self.system_prompt)
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl AppConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let openai_model = match get("OPENAI_MODEL") {
            Some(raw) => raw.parse::<OpenAiModel>().unwrap_or_default(),
            None => OpenAiModel::default(),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: format!("{bind_raw:?}: {e}"),
            })?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DB_MAX_CONNECTIONS",
                        reason: format!("{raw:?} is not a positive integer"),
                    })
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            openai_api_key,
            openai_model,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            system_prompt: get("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
            db_max_connections,
        })
    }
}
