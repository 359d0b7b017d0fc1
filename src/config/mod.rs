//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:6058"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:6058".to_string(),
        }
    }
}

/// Page size policy for collection endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagingConfig {
    /// Page size used when the request has none
    pub default_page_size: usize,

    /// Hard upper bound; larger requests are clamped
    pub max_page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

/// One public property of a declarative mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyConfig {
    /// Public (caller-facing) name
    pub name: String,

    /// Storage fields, in sort-key order
    pub storage: Vec<String>,

    /// Invert the requested direction
    #[serde(default)]
    pub revert: bool,
}

/// Declarative property mapping for one type pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingConfig {
    /// Public (DTO) type tag
    pub source: String,

    /// Storage (entity) type tag
    pub destination: String,

    pub properties: Vec<PropertyConfig>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,

    pub paging: PagingConfig,

    /// Extra mappings registered on top of the built-in ones
    pub mappings: Vec<MappingConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paging.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "paging.max_page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.paging.default_page_size == 0
            || self.paging.default_page_size > self.paging.max_page_size
        {
            return Err(ConfigError::InvalidValue {
                field: "paging.default_page_size".to_string(),
                message: format!(
                    "must be between 1 and max_page_size ({})",
                    self.paging.max_page_size
                ),
            });
        }
        Ok(())
    }
}
