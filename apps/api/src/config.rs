use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::relevance::filter::DEFAULT_FALLBACK_CAP;

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is present but unparseable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scoring credential. `None` leaves the relevance filter in fallback-only mode.
    pub anthropic_api_key: Option<String>,
    pub scoring_timeout: Duration,
    pub fallback_cap: usize,
    pub scrape_timeout: Duration,
    pub scrape_max_results: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let fallback_cap =
            validate_fallback_cap(parse_env("FALLBACK_CAP", DEFAULT_FALLBACK_CAP)?)?;

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            scoring_timeout: Duration::from_secs(parse_env("SCORING_TIMEOUT_SECS", 30)?),
            fallback_cap,
            scrape_timeout: Duration::from_secs(parse_env("SCRAPE_TIMEOUT_SECS", 60)?),
            scrape_max_results: parse_env("SCRAPE_MAX_RESULTS", 20)?,
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn validate_fallback_cap(cap: usize) -> Result<usize> {
    if cap == 0 {
        bail!("FALLBACK_CAP must be at least 1");
    }
    Ok(cap)
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
