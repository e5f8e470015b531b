//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Reasons the configuration cannot be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("API_KEY_HASHES must contain at least one key digest")]
    NoApiKeys,
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DING_API_KEY` (required): API key sent to the top-up provider
/// - `API_KEY_HASHES` (required): comma-separated SHA-256 hex digests of accepted bearer keys
/// - `DING_API_BASE_URL` (optional): provider base URL
/// - `UPSTREAM_TIMEOUT_SECS` (optional): provider request timeout, defaults to 30
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `CORS_ALLOW_ANY_ORIGIN` (optional): allow cross-origin GETs from anywhere, defaults to false
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ding_api_key: String,

    pub api_key_hashes: Vec<String>,

    #[serde(default = "default_base_url")]
    pub ding_api_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub upstream_timeout_secs: u64,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub cors_allow_any_origin: bool,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://api.dingconnect.com/api/V1/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DING_API_KEY)
    /// - Environment variable values cannot be parsed into expected types
    /// - `API_KEY_HASHES` holds no non-blank digest
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Same as [`Config::from_env`] but over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        // Field names are automatically converted: ding_api_key -> DING_API_KEY
        let config: Config = envy::from_iter(vars)?;

        if config.normalized_key_hashes().is_empty() {
            return Err(ConfigError::NoApiKeys);
        }

        Ok(config)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Accepted key digests, lowercased and stripped of blanks.
    pub fn normalized_key_hashes(&self) -> Vec<String> {
        self.api_key_hashes
            .iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect()
    }
}
