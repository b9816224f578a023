//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

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
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub openai_api_key: Option<String>,
    pub dua_model: String,
    pub aladhan_base_url: String,
    pub calculation_method: u32,
    pub upstream_timeout: Duration,
    pub cors_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to keep tests
    /// hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        // `mode=rwc` creates the database file on first start.
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://islamic_guidance.db?mode=rwc".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        let dua_model =
            std::env::var("DUA_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let aladhan_base_url = std::env::var("ALADHAN_BASE_URL")
            .unwrap_or_else(|_| "https://api.aladhan.com".to_string());

        let method_str =
            std::env::var("CALCULATION_METHOD").unwrap_or_else(|_| "2".to_string());
        let calculation_method = method_str.parse::<u32>().map_err(|_| {
            ConfigError::InvalidValue(
                "CALCULATION_METHOD".to_string(),
                format!("'{}' is not a number", method_str),
            )
        })?;

        let timeout_str =
            std::env::var("UPSTREAM_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "UPSTREAM_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a number", timeout_str),
            )
        })?;

        let cors_origin = std::env::var("CORS_ORIGIN").ok();

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            openai_api_key,
            dua_model,
            aladhan_base_url,
            calculation_method,
            upstream_timeout: Duration::from_secs(timeout_secs),
            cors_origin,
        })
    }
}
