use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pipeline::RetryPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub llm_max_attempts: u32,
    pub llm_backoff_ms: u64,
    pub llm_max_backoff_ms: u64,
    pub llm_correction_attempts: u32,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", 120)?,
            llm_max_attempts: env_or("LLM_MAX_ATTEMPTS", 3)?,
            llm_backoff_ms: env_or("LLM_BACKOFF_MS", 1000)?,
            llm_max_backoff_ms: env_or("LLM_MAX_BACKOFF_MS", 8000)?,
            llm_correction_attempts: env_or("LLM_CORRECTION_ATTEMPTS", 1)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }

    /// Retry policy applied around every model call.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.llm_max_attempts.max(1),
            base_delay: Duration::from_millis(self.llm_backoff_ms),
            max_delay: Duration::from_millis(self.llm_max_backoff_ms),
            correction_attempts: self.llm_correction_attempts,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
