//! Client configuration
//!
//! Read from the environment; anything unset or unparseable falls back to
//! the default and is logged.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://brandonslotty.com/sites/nutrition/api/controller.php";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 1_000;

/// Settings for the HTTP transport
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Controller URL every request is POSTed to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Total attempts per request, including the first
    pub retries: u32,
    /// Delay before the first retry; doubles on each further retry
    pub initial_backoff: Duration,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retries: DEFAULT_RETRIES,
            initial_backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: load("NUTRITION_API_URL", DEFAULT_API_URL.to_string()),
            timeout: Duration::from_millis(load("NUTRITION_API_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)),
            retries: load("NUTRITION_API_RETRIES", DEFAULT_RETRIES).max(1),
            initial_backoff: Duration::from_millis(load("NUTRITION_API_BACKOFF_MS", DEFAULT_BACKOFF_MS)),
            headers: Vec::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Backoff before retry number `attempt` (1-based): `initial * 2^(attempt-1)`
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

fn load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}; using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
