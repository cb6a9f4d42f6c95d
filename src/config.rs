//! Engine configuration.
//!
//! Configuration is read from a YAML file; every field has a default so
//! a partial file (or none at all) still yields a runnable config.
//! Secrets — the database URL and the routes API key — come from the
//! environment, never from the file.
//!
//! # Example
//!
//! ```no_run
//! use cost_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load("./engine.yaml").unwrap();
//! println!("Binding on {}:{}", config.server.host, config.server.port);
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Distance provider settings.
    pub distance: DistanceConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Distance provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// The computeRoutes endpoint URL.
    pub endpoint: String,
    /// The fixed origin address distances are measured from.
    pub origin_address: String,
    /// Request timeout in seconds for provider calls.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://routes.googleapis.com/directions/v2:computeRoutes".to_string(),
            origin_address: "Estrada de S. Marcos, nº 11, 2735-521 Cacém".to_string(),
            timeout_secs: 10,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the file does not
    /// exist and [`EngineError::ConfigParseError`] when it is not valid
    /// YAML for this structure.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads the file when it exists, otherwise returns the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.distance.timeout_secs, 10);
        assert!(config.distance.endpoint.contains("computeRoutes"));
        assert!(config.distance.origin_address.contains("Cacém"));
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "server:\n  port: 8080\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.distance.timeout_secs, 10);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = EngineConfig::load("/definitely/missing/engine.yaml").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_or_default_tolerates_missing_file() {
        let config = EngineConfig::load_or_default("/definitely/missing/engine.yaml").unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
