use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use crate::dns_record::RecordType;

const LOCAL_CONFIG_PATH: &str = "ferrous-lookup.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-lookup/config.toml";

/// Main configuration structure for ferrous-lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Which server to ask and how
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-lookup.toml in current directory
    /// 3. /etc/ferrous-lookup/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.host {
            self.resolver.host = host;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(record_type) = overrides.record_type {
            self.resolver.record_type = record_type;
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout;
        }
        if let Some(id) = overrides.transaction_id {
            self.resolver.transaction_id = id;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.host.trim().is_empty() {
            return Err(ConfigError::Validation("Server host cannot be empty".to_string()));
        }
        if self.resolver.port == 0 {
            return Err(ConfigError::Validation("Server port cannot be 0".to_string()));
        }
        self.record_type()?;
        Ok(())
    }

    pub fn record_type(&self) -> Result<RecordType, ConfigError> {
        self.resolver
            .record_type
            .parse()
            .map_err(ConfigError::Validation)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub record_type: Option<String>,
    pub timeout_ms: Option<u64>,
    pub transaction_id: Option<u16>,
    pub log_level: Option<String>,
}
