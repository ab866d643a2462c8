//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;
use url::Url;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the project REST API, without a trailing slash.
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- API Settings ---
        let base = lookup("PROTECH_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("PROTECH_API_BASE_URL".to_string()))?;
        let parsed = Url::parse(base.trim()).map_err(|e| {
            ConfigError::InvalidValue("PROTECH_API_BASE_URL".to_string(), e.to_string())
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(
                "PROTECH_API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        let api_base_url = base.trim().trim_end_matches('/').to_string();

        // --- Session Storage ---
        let session_path = lookup("PROTECH_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./session.json"));

        // --- Logging ---
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            session_path,
            log_level,
        })
    }
}
