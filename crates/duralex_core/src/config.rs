//! Environment-driven configuration.
//!
//! # Responsibility
//! - Resolve Gemini adapter settings from environment variables.
//! - Keep variable names and defaults in one place.
//!
//! # Invariants
//! - A missing API key is not a configuration error; requests fail later
//!   with `GenerationError::MissingApiKey` so the modal can show it.
//! - Resolution never panics.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names.
pub mod env_vars {
    pub const GEMINI_API_KEY: &str = "DURALEX_GEMINI_API_KEY";
    /// Checked in order when `GEMINI_API_KEY` is unset.
    pub const GEMINI_API_KEY_FALLBACKS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];
    pub const GEMINI_MODEL: &str = "DURALEX_GEMINI_MODEL";
    pub const GEMINI_ENDPOINT: &str = "DURALEX_GEMINI_ENDPOINT";
    pub const GEMINI_TIMEOUT_SECS: &str = "DURALEX_GEMINI_TIMEOUT_SECS";
    pub const LOG_DIR: &str = "DURALEX_LOG_DIR";
    pub const LOG_LEVEL: &str = "DURALEX_LOG_LEVEL";
}

/// Default values.
pub mod defaults {
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const GEMINI_TIMEOUT_SECS: u64 = 60;
}

/// Configuration errors for malformed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                name,
                value,
                reason,
            } => write!(f, "invalid value `{value}` for {name}: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for the Gemini text-generation adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL without trailing slash.
    pub endpoint: String,
    /// Transport timeout for one request.
    pub timeout: Duration,
}

// Keeps the key out of debug output and logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::GEMINI_MODEL.to_string(),
            endpoint: defaults::GEMINI_ENDPOINT.to_string(),
            timeout: Duration::from_secs(defaults::GEMINI_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = std::iter::once(env_vars::GEMINI_API_KEY)
            .chain(env_vars::GEMINI_API_KEY_FALLBACKS.iter().copied())
            .find_map(|name| read(name));

        let model = read(env_vars::GEMINI_MODEL)
            .unwrap_or_else(|| defaults::GEMINI_MODEL.to_string());

        let endpoint = read(env_vars::GEMINI_ENDPOINT)
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| defaults::GEMINI_ENDPOINT.to_string());

        let timeout = match read(env_vars::GEMINI_TIMEOUT_SECS) {
            None => Duration::from_secs(defaults::GEMINI_TIMEOUT_SECS),
            Some(raw) => parse_timeout(&raw)?,
        };

        Ok(Self {
            api_key,
            model,
            endpoint,
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason| ConfigError::InvalidValue {
        name: env_vars::GEMINI_TIMEOUT_SECS,
        value: raw.to_string(),
        reason,
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(invalid("timeout must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(invalid("expected a whole number of seconds")),
    }
}
