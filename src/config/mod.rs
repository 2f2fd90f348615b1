//! Configuration loading and validation.

mod memory;

pub use memory::LastQuery;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::Region;

/// Placeholder key shipped in the example config.
pub const PLACEHOLDER_API_KEY: &str = "RGAPI-YOUR-API-KEY-HERE";

/// Environment variable that overrides `riot_api_key`.
pub const API_KEY_ENV: &str = "RIOT_API_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Outbound HTTP settings for the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries after a 429 before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    format!("sniped/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

/// How much match history to scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Matches scanned per HTTP request
    #[serde(default = "default_match_count")]
    pub match_count: u32,

    /// Matches scanned per CLI query (kept small for speed)
    #[serde(default = "default_cli_match_count")]
    pub cli_match_count: u32,
}

fn default_match_count() -> u32 {
    100
}

fn default_cli_match_count() -> u32 {
    20
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            match_count: default_match_count(),
            cli_match_count: default_cli_match_count(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Development mode: accept any origin
    #[serde(default)]
    pub allow_all_origins: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:4000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            allow_all_origins: false,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub riot_api_key: String,

    #[serde(default)]
    pub default_region: Region,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            riot_api_key: PLACEHOLDER_API_KEY.to_string(),
            default_region: Region::default(),
            analysis: AnalysisConfig::default(),
            http: HttpConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` if it exists, otherwise defaults, then apply the
    /// `RIOT_API_KEY` override. Not validated: the key may still be unset.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            AppConfig::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.riot_api_key = key.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Write the configuration back as TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        let key = self.riot_api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// Key shown as `abcd...wxyz`, or as-is when too short to mask.
    pub fn masked_api_key(&self) -> String {
        let key = &self.riot_api_key;
        if !self.has_api_key() {
            return "Not Set".to_string();
        }
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 8 {
            return key.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.has_api_key() {
            return Err(ConfigError::ValidationError(
                "riot_api_key is not set".to_string(),
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "HTTP timeout must be greater than 0".to_string(),
            ));
        }

        if self.analysis.match_count == 0 || self.analysis.cli_match_count == 0 {
            return Err(ConfigError::ValidationError(
                "Match counts must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            riot_api_key: "RGAPI-0123-4567-89ab".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_region, Region::Na1);
        assert_eq!(config.analysis.match_count, 100);
        assert_eq!(config.analysis.cli_match_count, 20);
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.server.port, 5000);
        assert!(!config.server.allow_all_origins);
        assert_eq!(config.server.cors_origins.len(), 2);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_placeholder_key_rejected() {
        assert!(AppConfig::default().validate().is_err());

        let mut config = valid();
        config.riot_api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = valid();
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_match_count() {
        let mut config = valid();
        config.analysis.cli_match_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = valid();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_masked_api_key() {
        assert_eq!(valid().masked_api_key(), "RGAP...89ab");
        assert_eq!(AppConfig::default().masked_api_key(), "Not Set");

        let mut short = valid();
        short.riot_api_key = "abc".to_string();
        assert_eq!(short.masked_api_key(), "abc");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            riot_api_key = "RGAPI-xyz"
            default_region = "euw1"

            [server]
            port = 8080
            allow_all_origins = true
            "#,
        )
        .unwrap();

        assert_eq!(config.default_region, Region::Euw1);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.allow_all_origins);
        assert_eq!(config.analysis.match_count, 100);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        valid().save(&path).unwrap();
        let loaded: AppConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        loaded.validate().unwrap();
        assert_eq!(loaded.riot_api_key, "RGAPI-0123-4567-89ab");
        assert_eq!(loaded.default_region, Region::Na1);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 5000);
    }
}
