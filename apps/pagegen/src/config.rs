use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::research::SearchContextSize;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub perplexity_api_key: String,
    pub anthropic_api_key: String,
    pub openai_api_key: String,
    pub output_dir: PathBuf,
    pub search_context_size: SearchContextSize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            perplexity_api_key: require_env("PERPLEXITY_API_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "output".to_string())
                .into(),
            search_context_size: std::env::var("SEARCH_CONTEXT_SIZE")
                .unwrap_or_else(|_| "medium".to_string())
                .parse()
                .context("SEARCH_CONTEXT_SIZE must be one of: low, medium, high")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
