//! Server configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or none at all) is a valid configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for this schema
    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow any origin, method and header, with credentials
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// RDF files merged into the graph at startup
    pub data_paths: Vec<PathBuf>,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
            data_paths: vec![PathBuf::from("data/p-lod.ttl")],
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a YAML document
    pub fn from_yaml(input: &str) -> ConfigResult<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&input)
    }

    /// `address:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
