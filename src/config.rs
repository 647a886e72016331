//! Configuration for adkit.
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.adkit/config.toml
//!
//! The access token never lives in the config file: it comes from the
//! environment (or a local .env), and its absence is a fatal configuration
//! error raised before any network activity.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::adjust::MAX_ADJUSTMENT_PERCENT;
use crate::errors::{AdsError, Result};

/// Environment variable carrying the Marketing API access token.
pub const TOKEN_ENV_VAR: &str = "FACEBOOK_ACCESS_TOKEN";

/// Complete configuration for adkit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Graph API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub version: String,
    pub timeout_secs: u64,
}

/// Default values for subcommand flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub adjustment_percent: i32,
    pub lookback_days: u32,
    pub page_limit: usize,
}

/// Console and export output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color: bool,
    pub csv_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://graph.facebook.com".to_string(),
            version: "v19.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            adjustment_percent: 10,
            lookback_days: 7,
            page_limit: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            csv_path: "campaigns.csv".to_string(),
        }
    }
}

impl DefaultsConfig {
    /// Adjustment percentage: the flag when given, the config default otherwise.
    pub fn resolve_adjustment(&self, flag: Option<i32>) -> i32 {
        flag.unwrap_or(self.adjustment_percent)
    }

    /// Lookback days: the flag when given, the config default otherwise.
    pub fn resolve_lookback(&self, flag: Option<u32>) -> u32 {
        flag.unwrap_or(self.lookback_days)
    }

    /// Listing page size: the flag when given, the config default otherwise.
    pub fn resolve_limit(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.page_limit)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AdsError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AdsError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location or fall back to built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".adkit").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.is_empty() {
            return Err(AdsError::ConfigError(
                "api.endpoint must not be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(AdsError::ConfigError(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.defaults.lookback_days == 0 {
            return Err(AdsError::ConfigError(
                "defaults.lookback_days must be at least 1".to_string(),
            ));
        }

        if self.defaults.page_limit == 0 {
            return Err(AdsError::ConfigError(
                "defaults.page_limit must be greater than 0".to_string(),
            ));
        }

        if self.defaults.adjustment_percent.unsigned_abs() > MAX_ADJUSTMENT_PERCENT {
            return Err(AdsError::ConfigError(format!(
                "defaults.adjustment_percent magnitude must not exceed {}",
                MAX_ADJUSTMENT_PERCENT
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AdsError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AdsError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AdsError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

/// Resolve the API access token from the environment (or a local .env).
///
/// Called once per command, before the client is constructed, so a missing
/// credential fails the run with no network activity.
pub fn access_token() -> Result<String> {
    dotenv::dotenv().ok();

    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(AdsError::MissingCredential),
    }
}
