// src/config.rs
// =============================================================================
// Runtime configuration, read from the environment (and a .env file).
//
//   GITHUB_TOKEN         required, personal access token
//   GITHUB_GRAPHQL_URL   optional, defaults to the public API endpoint
//   GITHUB_TIMEOUT_SECS  optional, per-request timeout (default 30)
//
// The token is wrapped in a SecretBox so it never shows up in Debug output.
// =============================================================================

use secrecy::SecretBox;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const ENDPOINT_VAR: &str = "GITHUB_GRAPHQL_URL";
pub const TIMEOUT_VAR: &str = "GITHUB_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN environment variable is not set")]
    MissingToken,

    #[error("invalid GITHUB_GRAPHQL_URL '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid GITHUB_TIMEOUT_SECS '{0}': expected a whole number of seconds")]
    InvalidTimeout(String),
}

#[derive(Debug)]
pub struct Config {
    pub token: SecretBox<String>,
    pub endpoint: Url,
    pub timeout: Duration,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Separated from from_env so tests can feed a fake environment
    // without touching process-wide state.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let endpoint_raw = lookup(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|source| ConfigError::InvalidEndpoint {
            value: endpoint_raw.clone(),
            source,
        })?;

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            token: SecretBox::new(Box::new(token)),
            endpoint,
            timeout,
        })
    }
}
