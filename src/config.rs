//! Typed configuration loaded from a TOML file.
//!
//! Every section is optional; missing values take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{
    variability_from_band, Variability, DEFAULT_PRIMARY_COUNT, DEFAULT_VARIABILITY_MAX,
    DEFAULT_VARIABILITY_MIN,
};
use crate::error::AdvisorError;

/// Top-level advisor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Default tracing filter when `RUST_LOG` is unset, e.g. "info".
    pub log_level: String,
    pub variability: VariabilityConfig,
    pub recommendations: RecommendationConfig,
    pub server: ServerConfig,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            variability: VariabilityConfig::default(),
            recommendations: RecommendationConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Band of the random seasonal factor applied to every estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariabilityConfig {
    pub min: f64,
    pub max: f64,
    /// Fixed seed for reproducible estimates.
    pub seed: Option<u64>,
}

impl Default for VariabilityConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_VARIABILITY_MIN,
            max: DEFAULT_VARIABILITY_MAX,
            seed: None,
        }
    }
}

impl VariabilityConfig {
    /// A zero-width band at 1.0: estimates become deterministic.
    pub fn disabled() -> Self {
        Self {
            min: 1.0,
            max: 1.0,
            seed: None,
        }
    }

    pub fn build(&self) -> Result<Box<dyn Variability + Send>, AdvisorError> {
        variability_from_band(self.min, self.max, self.seed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub primary_count: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            primary_count: DEFAULT_PRIMARY_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl AdvisorConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, AdvisorError> {
        let config: AdvisorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AdvisorError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        let v = &self.variability;
        if !(v.min > 0.0 && v.max > 0.0) {
            return Err(AdvisorError::ValidationError(format!(
                "variability bounds must be positive, got [{}, {}]",
                v.min, v.max
            )));
        }
        if v.min > v.max {
            return Err(AdvisorError::ValidationError(format!(
                "variability min {} exceeds max {}",
                v.min, v.max
            )));
        }
        if self.recommendations.primary_count == 0 {
            return Err(AdvisorError::ValidationError(
                "recommendations.primary_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
