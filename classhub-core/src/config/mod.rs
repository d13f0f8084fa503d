//! Configuration management for classhub
//!
//! Environment-based configuration with defaults and validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// gRPC bind address
    pub bind_address: SocketAddr,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data directory for persistent storage
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Path of the SQLite database file inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("classhub.db")
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directives (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:50051".parse().unwrap(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: CLASSHUB_<SECTION>_<KEY>
    /// Example: CLASSHUB_SERVER_BIND_ADDRESS=0.0.0.0:50051
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("CLASSHUB_SERVER_BIND_ADDRESS") {
            config.server.bind_address = addr
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid bind address: {}", e)))?;
        }

        if let Ok(data_dir) = env::var("CLASSHUB_STORE_DATA_DIR") {
            config.store.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(level) = env::var("CLASSHUB_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "log level must not be empty".to_string(),
            ));
        }
        if self.store.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "store data directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert!(config
            .store
            .database_path()
            .ends_with("classhub.db"));
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("CLASSHUB_SERVER_BIND_ADDRESS", "0.0.0.0:6000");
        env::set_var("CLASSHUB_LOG_LEVEL", "debug");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server.bind_address.port(), 6000);
        assert_eq!(config.logging.level, "debug");

        env::remove_var("CLASSHUB_SERVER_BIND_ADDRESS");
        env::remove_var("CLASSHUB_LOG_LEVEL");
    }

    #[test]
    fn test_empty_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = String::new();
        assert!(config.validate().is_err());
    }
}
