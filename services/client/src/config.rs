//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_POLL_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub log_level: Level,
    /// A previously issued session token, resumed without logging in.
    pub token: Option<String>,
    pub poll_interval: Duration,
    pub page_size: u32,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: Level::INFO,
            token: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
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

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Location ---
        let api_url = lookup("FORUM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "FORUM_API_URL".to_string(),
                format!("'{}' is not an http(s) URL", api_url),
            ));
        }

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let token = lookup("FORUM_TOKEN").filter(|t| !t.trim().is_empty());

        // --- Polling and Paging ---
        let poll_secs: u64 = parse_or(&lookup, "NOTIFICATION_POLL_SECS", DEFAULT_POLL_SECS)?;
        if poll_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "NOTIFICATION_POLL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let page_size: u32 = parse_or(&lookup, "NOTIFICATION_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue(
                "NOTIFICATION_PAGE_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let timeout_secs: u64 =
            parse_or(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            api_url,
            log_level,
            token,
            poll_interval: Duration::from_secs(poll_secs),
            page_size,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
    }
}
