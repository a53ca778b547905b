use crate::error::{Result, TrackxError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Tunables for the extraction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Degree delta below which two raw candidates are duplicates (~100m at 0.001)
    pub dedup_degrees: f64,
    /// Meter radius below which two assembled records are duplicates
    pub dedup_radius_m: f64,
    /// Characters of context kept before a matched coordinate
    pub context_before: usize,
    /// Characters of context kept after a matched coordinate
    pub context_after: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            dedup_degrees: 0.001,
            dedup_radius_m: 100.0,
            context_before: 100,
            context_after: 200,
        }
    }
}

impl ExtractorConfig {
    /// Create a configuration with custom thresholds
    pub fn new(
        dedup_degrees: f64,
        dedup_radius_m: f64,
        context_before: usize,
        context_after: usize,
    ) -> Result<Self> {
        let config = Self { dedup_degrees, dedup_radius_m, context_before, context_after };
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are finite and positive
    pub fn validate(&self) -> Result<()> {
        if !self.dedup_degrees.is_finite() || self.dedup_degrees <= 0.0 {
            return Err(TrackxError::ConfigInvalid {
                key: "dedup_degrees".to_string(),
                reason: format!("must be a positive number, got {}", self.dedup_degrees),
            });
        }

        if !self.dedup_radius_m.is_finite() || self.dedup_radius_m <= 0.0 {
            return Err(TrackxError::ConfigInvalid {
                key: "dedup_radius_m".to_string(),
                reason: format!("must be a positive number, got {}", self.dedup_radius_m),
            });
        }

        Ok(())
    }
}

/// Layered configuration for TrackX
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub dedup_degrees: ConfigValue<f64>,
    pub dedup_radius_m: ConfigValue<f64>,
    pub context_before: ConfigValue<usize>,
    pub context_after: ConfigValue<usize>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let defaults = ExtractorConfig::default();
        Self {
            dedup_degrees: ConfigValue::new(defaults.dedup_degrees, ConfigSource::Default),
            dedup_radius_m: ConfigValue::new(defaults.dedup_radius_m, ConfigSource::Default),
            context_before: ConfigValue::new(defaults.context_before, ConfigSource::Default),
            context_after: ConfigValue::new(defaults.context_after, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| TrackxError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| TrackxError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(dedup_degrees) = file_config.dedup_degrees {
            self.dedup_degrees.update(dedup_degrees, ConfigSource::File);
        }

        if let Some(dedup_radius_m) = file_config.dedup_radius_m {
            self.dedup_radius_m.update(dedup_radius_m, ConfigSource::File);
        }

        if let Some(context_before) = file_config.context_before {
            self.context_before.update(context_before, ConfigSource::File);
        }

        if let Some(context_after) = file_config.context_after {
            self.context_after.update(context_after, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // TRACKX_DEDUP_DEGREES
        if let Ok(degrees_str) = env::var("TRACKX_DEDUP_DEGREES") {
            match degrees_str.parse::<f64>() {
                Ok(degrees) => self.dedup_degrees.update(degrees, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TRACKX_DEDUP_DEGREES value '{}': expected decimal degrees",
                    degrees_str
                ),
            }
        }

        // TRACKX_DEDUP_RADIUS_M
        if let Ok(radius_str) = env::var("TRACKX_DEDUP_RADIUS_M") {
            match radius_str.parse::<f64>() {
                Ok(radius) => self.dedup_radius_m.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TRACKX_DEDUP_RADIUS_M value '{}': expected meters",
                    radius_str
                ),
            }
        }

        // TRACKX_CONTEXT_BEFORE
        if let Ok(before_str) = env::var("TRACKX_CONTEXT_BEFORE") {
            match before_str.parse::<usize>() {
                Ok(before) => self.context_before.update(before, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TRACKX_CONTEXT_BEFORE value '{}': expected character count",
                    before_str
                ),
            }
        }

        // TRACKX_CONTEXT_AFTER
        if let Ok(after_str) = env::var("TRACKX_CONTEXT_AFTER") {
            match after_str.parse::<usize>() {
                Ok(after) => self.context_after.update(after, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TRACKX_CONTEXT_AFTER value '{}': expected character count",
                    after_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(dedup_degrees) = overrides.dedup_degrees {
            self.dedup_degrees.update(dedup_degrees, ConfigSource::Cli);
        }

        if let Some(dedup_radius_m) = overrides.dedup_radius_m {
            self.dedup_radius_m.update(dedup_radius_m, ConfigSource::Cli);
        }

        if let Some(context_before) = overrides.context_before {
            self.context_before.update(context_before, ConfigSource::Cli);
        }

        if let Some(context_after) = overrides.context_after {
            self.context_after.update(context_after, ConfigSource::Cli);
        }
    }

    /// Collapse the layers into a validated extractor configuration
    pub fn into_extractor_config(self) -> Result<ExtractorConfig> {
        ExtractorConfig::new(
            self.dedup_degrees.value,
            self.dedup_radius_m.value,
            self.context_before.value,
            self.context_after.value,
        )
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "dedup_degrees".to_string(),
            (format!("{}", self.dedup_degrees.value), self.dedup_degrees.source),
        );

        map.insert(
            "dedup_radius_m".to_string(),
            (format!("{}m", self.dedup_radius_m.value), self.dedup_radius_m.source),
        );

        map.insert(
            "context_before".to_string(),
            (format!("{}", self.context_before.value), self.context_before.source),
        );

        map.insert(
            "context_after".to_string(),
            (format!("{}", self.context_after.value), self.context_after.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    dedup_degrees: Option<f64>,
    dedup_radius_m: Option<f64>,
    context_before: Option<usize>,
    context_after: Option<usize>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub dedup_degrees: Option<f64>,
    pub dedup_radius_m: Option<f64>,
    pub context_before: Option<usize>,
    pub context_after: Option<usize>,
}
