use anyhow::{Context, Result};
use std::env;
use tracing::{debug, warn};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEV_JWT_SECRET: &str = "todo-manager-dev-secret";

/// Server settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Environment variables:
    /// - `TODO_BIND_ADDR` (default `127.0.0.1:5000`)
    /// - `TODO_JWT_SECRET` (default is a fixed development secret)
    /// - `TODO_TOKEN_TTL_SECS` (default 3600)
    pub fn from_env() -> Result<Self> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        let defaults = Self::default();
        let bind_addr = non_empty_var("TODO_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let jwt_secret = match non_empty_var("TODO_JWT_SECRET") {
            Some(secret) => secret,
            None => {
                warn!("TODO_JWT_SECRET not set, using development secret");
                defaults.jwt_secret
            }
        };
        let token_ttl_secs = match non_empty_var("TODO_TOKEN_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("TODO_TOKEN_TTL_SECS is not a number: {}", raw))?,
            None => defaults.token_ttl_secs,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl_secs,
        })
    }
}

pub(crate) fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
