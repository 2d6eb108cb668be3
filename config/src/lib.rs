//! # Configuration Management for MongoHaus
//!
//! This crate provides centralized configuration structures for all MongoHaus components,
//! including the document store connection and signal system settings.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{DatabaseConfig, SignalConfig};
//!
//! // Store address and database name, everything else defaulted
//! let db_config = DatabaseConfig::new("localhost:27017", "myapp");
//!
//! // Signal configuration
//! let signal_config = SignalConfig::new(true, 100);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [database]
//! address = "localhost:27017"
//! database = "myapp"
//! app_name = "myapp-api"
//! connect_timeout_ms = 10000
//! server_selection_timeout_ms = 30000
//!
//! [signal]
//! enabled = true
//! max_callbacks = 100
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from mongohaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./mongohaus.toml";
const CONFIG_PATH_VAR: &str = "MONGOHAUS_CONFIG";

pub const DEFAULT_ADDRESS: &str = "localhost:27017";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_SERVER_SELECTION_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub signal: SignalConfig,
}

/// Document store connection configuration
///
/// `address` is either a bare `host:port` list or a full `mongodb://` /
/// `mongodb+srv://` URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_address")]
    pub address: String,
    pub database: String,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,
}

/// Signal system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    pub enabled: bool,
    pub max_callbacks: usize,
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_server_selection_timeout_ms() -> u64 {
    DEFAULT_SERVER_SELECTION_TIMEOUT_MS
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = {
            // A missing .env file is fine, the variable may come from the environment
            match dotenvy::dotenv() {
                Ok(_) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }

            if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
                Self::from_file(&config_path)
            } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            } else {
                Err(ConfigError::Invalid(format!(
                    "Config path must be specified in .env file as {} or in {} file",
                    CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
                )))
            }
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;

        if self.signal.enabled && self.signal.max_callbacks == 0 {
            return Err(ConfigError::Invalid(
                "Signal max_callbacks must be greater than 0 when signals are enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_callbacks: 100,
        }
    }
}

impl SignalConfig {
    /// Create a new signal configuration
    pub fn new(enabled: bool, max_callbacks: usize) -> Self {
        Self {
            enabled,
            max_callbacks,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with default timeouts
    pub fn new(address: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            database: database.into(),
            app_name: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            server_selection_timeout_ms: DEFAULT_SERVER_SELECTION_TIMEOUT_MS,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_timeouts(mut self, connect_timeout_ms: u64, server_selection_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self.server_selection_timeout_ms = server_selection_timeout_ms;
        self
    }

    /// Build connection string
    pub fn connection_string(&self) -> String {
        if self.address.starts_with("mongodb://") || self.address.starts_with("mongodb+srv://") {
            self.address.clone()
        } else {
            format!("mongodb://{}", self.address)
        }
    }

    /// Validate connection values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Database address cannot be empty".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(ConfigError::Invalid(
                "Database name cannot be empty".to_string(),
            ));
        }
        if self
            .database
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '.' | ' ' | '"' | '$' | '\0'))
        {
            return Err(ConfigError::Invalid(format!(
                "Database name '{}' contains invalid characters",
                self.database
            )));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "Database connect_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.server_selection_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "Database server_selection_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_connection_string_from_bare_address() {
        let config = DatabaseConfig::new("db.internal:27017", "app");
        assert_eq!(config.connection_string(), "mongodb://db.internal:27017");
    }

    #[test]
    fn test_connection_string_keeps_full_uri() {
        let config = DatabaseConfig::new("mongodb+srv://cluster.example.net", "app");
        assert_eq!(
            config.connection_string(),
            "mongodb+srv://cluster.example.net"
        );
    }

    #[test]
    fn test_toml_defaults_applied() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            database = "songs"
            "#,
        )
        .expect("minimal config should parse");

        assert_eq!(config.database.address, DEFAULT_ADDRESS);
        assert_eq!(config.database.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
        assert!(config.database.app_name.is_none());
        assert!(!config.signal.enabled);
    }

    #[test]
    fn test_rejects_empty_database_name() {
        let err = AppConfig::from_toml_str(
            r#"
            [database]
            database = ""
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_invalid_database_characters() {
        let config = DatabaseConfig::new(DEFAULT_ADDRESS, "my.db");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let config = DatabaseConfig::new(DEFAULT_ADDRESS, "app").with_timeouts(0, 1000);
        assert!(config.validate().is_err());

        let config = DatabaseConfig::new(DEFAULT_ADDRESS, "app").with_timeouts(1000, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_enabled_signals_without_capacity() {
        let err = AppConfig::from_toml_str(
            r#"
            [database]
            database = "app"

            [signal]
            enabled = true
            max_callbacks = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[database]\naddress = \"mongo:27017\"\ndatabase = \"inventory\"\napp_name = \"svc\"\n"
        )
        .expect("write config");

        let config = AppConfig::from_file(file.path()).expect("config loads");
        assert_eq!(config.database.address, "mongo:27017");
        assert_eq!(config.database.database, "inventory");
        assert_eq!(config.database.app_name.as_deref(), Some("svc"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file("/definitely/not/here/mongohaus.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
