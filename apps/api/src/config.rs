use anyhow::{Context, Result};

use crate::session::autosave::DEFAULT_DEBOUNCE;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Empty when unset; auth calls then fail with a configuration error.
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Empty when unset; AI generation then fails fast.
    pub gemini_api_key: String,
    pub autosave_debounce_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            supabase_url: optional_env("SUPABASE_URL"),
            supabase_anon_key: optional_env("SUPABASE_ANON_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            autosave_debounce_ms: std::env::var("AUTOSAVE_DEBOUNCE_MS")
                .unwrap_or_else(|_| DEFAULT_DEBOUNCE.as_millis().to_string())
                .parse::<u64>()
                .context("AUTOSAVE_DEBOUNCE_MS must be a number of milliseconds")?,
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

fn optional_env(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
