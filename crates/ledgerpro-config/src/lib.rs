//! Configuration management
//!
//! This module handles loading and validation of the application
//! configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the data files
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Ledger file name (accounts and transactions)
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    /// Closed-account flag registry file name
    #[serde(default = "default_flags_file")]
    pub flags_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            ledger_file: default_ledger_file(),
            flags_file: default_flags_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_ledger_file() -> String {
    "ledger.json".to_string()
}

fn default_flags_file() -> String {
    "closed-accounts.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data file settings
    #[serde(default)]
    pub data: DataConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.data.ledger_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.ledger_file".to_string(),
                reason: "Ledger file name must not be empty".to_string(),
            });
        }

        if self.data.flags_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.flags_file".to_string(),
                reason: "Flags file name must not be empty".to_string(),
            });
        }

        match self.logging.level.as_str() {
            "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level".to_string(),
                    reason: format!("Unknown log level '{}'", other),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.ledger_file)
    }

    /// Get the full path to the closed-account flag registry file
    pub fn flags_path(&self) -> PathBuf {
        self.data.path.join(&self.data.flags_file)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_mapping() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.data.ledger_file, "ledger.json");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config: Config = serde_yaml::from_str("server:\n  port: 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let config: Config = serde_yaml::from_str("logging:\n  level: loud\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level")
        );
    }

    #[test]
    fn test_data_paths_join() {
        let config: Config = serde_yaml::from_str("data:\n  path: /var/ledger\n").unwrap();
        assert_eq!(config.ledger_path(), PathBuf::from("/var/ledger/ledger.json"));
        assert_eq!(
            config.flags_path(),
            PathBuf::from("/var/ledger/closed-accounts.json")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(PathBuf::from("/no/such/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"server:\n  host: 127.0.0.1\n  port: 9000\n")
            .unwrap();

        let config = Config::load(path).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }
}
