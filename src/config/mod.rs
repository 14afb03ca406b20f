//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Paging limits applied by the REST exposure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a request names none
    pub default_page_size: i64,

    /// Largest page size a request may ask for
    pub max_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

/// Complete configuration of a query service
///
/// # Example
///
/// ```yaml
/// pagination:
///   default_page_size: 20
///   max_page_size: 100
/// logging:
///   level: info
/// server:
///   address: 127.0.0.1:3000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

impl QueryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pagination = &self.pagination;
        if pagination.default_page_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if pagination.max_page_size < pagination.default_page_size {
            return Err(ConfigError::InvalidValue {
                field: "pagination.max_page_size".to_string(),
                message: format!(
                    "must be at least default_page_size ({})",
                    pagination.default_page_size
                ),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
