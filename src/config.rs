//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (development, production)
    pub environment: String,

    /// Base URL of the external authorization service. When unset, a
    /// local approving stand-in is wired instead.
    pub authorizer_url: Option<String>,

    /// Base URL of the notification webhook. When unset, completions are
    /// only logged.
    pub notifier_url: Option<String>,

    /// Timeout for outbound HTTP calls, in seconds
    pub http_timeout_secs: u64,

    /// Bound for whole-operation retries on concurrent wallet modification
    pub max_transfer_retries: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let authorizer_url = env::var("AUTHORIZER_URL").ok();
        let notifier_url = env::var("NOTIFIER_URL").ok();

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_TIMEOUT_SECS"))?;

        let max_transfer_retries = env::var("MAX_TRANSFER_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("MAX_TRANSFER_RETRIES"))?;

        Ok(Self {
            environment,
            authorizer_url,
            notifier_url,
            http_timeout_secs,
            max_transfer_retries,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
