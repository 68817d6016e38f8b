//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JUDGE_BASE_URL, DEFAULT_JUDGE_TIMEOUT_SECONDS,
    DEFAULT_MAX_POLL_SECONDS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SYNC_CATEGORY, DEFAULT_SYNC_PAGE_DELAY_MS, DEFAULT_SYNC_PAGE_SIZE,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub judge: JudgeConfig,
    pub sync: SyncConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT verification configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// External judge configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub base_url: String,
    /// Session cookie value; empty means anonymous requests
    pub session: String,
    pub request_timeout_seconds: u64,
    pub poll_interval_ms: u64,
    pub max_poll_seconds: u64,
}

/// Catalog sync configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub page_size: u32,
    pub page_delay_ms: u64,
    pub category: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
            sync: SyncConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("JUDGE_BASE_URL").unwrap_or_else(|_| DEFAULT_JUDGE_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("JUDGE_BASE_URL".to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: env::var("JUDGE_SESSION").unwrap_or_default(),
            request_timeout_seconds: parse_var("JUDGE_TIMEOUT_SECONDS", DEFAULT_JUDGE_TIMEOUT_SECONDS)?,
            poll_interval_ms: parse_var("JUDGE_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?,
            max_poll_seconds: parse_var("JUDGE_MAX_POLL_SECONDS", DEFAULT_MAX_POLL_SECONDS)?,
        })
    }

    /// Per-request timeout for the judge HTTP client
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl SyncConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            page_size: parse_var("SYNC_PAGE_SIZE", DEFAULT_SYNC_PAGE_SIZE)?,
            page_delay_ms: parse_var("SYNC_PAGE_DELAY_MS", DEFAULT_SYNC_PAGE_DELAY_MS)?,
            category: env::var("SYNC_CATEGORY").unwrap_or_else(|_| DEFAULT_SYNC_CATEGORY.to_string()),
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
