use anyhow::{Context, Result};

use crate::llm_client::Provider;

/// Origins permitted to call the API from a browser when ALLOWED_ORIGINS is unset.
/// Matches the local dev setup of the static portfolio frontend.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://127.0.0.1:5500,http://localhost:5500";

/// Application configuration loaded from environment variables.
/// Read once at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public file identifier of the profile PDF on the hosting service.
    pub drive_file_id: String,
    pub model_name: String,
    pub model_provider: Provider,
    /// API key for the configured provider (ANTHROPIC_API_KEY or OPENAI_API_KEY).
    pub api_key: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let model_provider: Provider = require_env("MODEL_PROVIDER")?
            .parse()
            .map_err(anyhow::Error::msg)
            .context("MODEL_PROVIDER must be 'anthropic' or 'openai'")?;

        Ok(Config {
            drive_file_id: require_env("DRIVE_FILE_ID")?,
            model_name: require_env("MODEL_NAME")?,
            api_key: require_env(model_provider.api_key_var())?,
            model_provider,
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Splits a comma-separated origin list, trimming whitespace and dropping
/// empty segments (a trailing comma is tolerated).
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
