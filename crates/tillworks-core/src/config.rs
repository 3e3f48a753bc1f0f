//! Configuration loading and typed config structures for Tillworks.
//!
//! The canonical configuration lives in `tillworks-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.

use std::path::Path;

use serde::Deserialize;

/// Why a farm configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read farm config: {source}")]
    Io {
        /// I/O failure from the filesystem.
        #[from]
        source: std::io::Error,
    },

    /// The document is not valid YAML for [`FarmConfig`].
    #[error("invalid farm config YAML: {source}")]
    Yaml {
        /// Parser error from `serde_yml`.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Tillworks configuration.
///
/// Mirrors the structure of `tillworks-config.yaml`. All fields have
/// defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FarmConfig {
    /// Layout and scheduling settings.
    #[serde(default)]
    pub farm: FarmSection,

    /// Fertilizer and reservoir settings.
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Power debounce settings.
    #[serde(default)]
    pub power: PowerConfig,

    /// Host loop settings for the engine binary.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FarmConfig {
    /// Read and validate the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.farm.default_strategy.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "farm.default_strategy must not be empty".to_owned(),
            });
        }
        if self.resources.fertilizer_per_item == 0 {
            return Err(ConfigError::Invalid {
                reason: "resources.fertilizer_per_item must be at least 1".to_owned(),
            });
        }
        if self.farm.replan_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                reason: "farm.replan_interval_ticks must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Layout and scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FarmSection {
    /// Multiplier on the structure's larger side for the scan distance.
    #[serde(default = "default_size_multiplier")]
    pub size_multiplier: u32,

    /// Keep every row at full length instead of trimming them diagonally.
    #[serde(default)]
    pub square_farms: bool,

    /// Ticks between safety re-plans of the target geometry.
    #[serde(default = "default_replan_interval_ticks")]
    pub replan_interval_ticks: u64,

    /// Registry name of the strategy installed on every side by default.
    #[serde(default = "default_strategy_name")]
    pub default_strategy: String,
}

impl Default for FarmSection {
    fn default() -> Self {
        Self {
            size_multiplier: default_size_multiplier(),
            square_farms: false,
            replan_interval_ticks: default_replan_interval_ticks(),
            default_strategy: default_strategy_name(),
        }
    }
}

/// Fertilizer and reservoir settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceConfig {
    /// Fertilizer units gained from one fertilizer item.
    #[serde(default = "default_fertilizer_per_item")]
    pub fertilizer_per_item: u32,

    /// Stock level at or below which upkeep consumes another item.
    #[serde(default = "default_fertilizer_buffer")]
    pub fertilizer_buffer: u32,

    /// Liquid reservoir capacity.
    #[serde(default = "default_reservoir_capacity")]
    pub reservoir_capacity: u32,

    /// Ticks between draining supply containers into the reservoir.
    #[serde(default = "default_liquid_drain_interval_ticks")]
    pub liquid_drain_interval_ticks: u64,
}

impl ResourceConfig {
    /// Maximum fertilizer stock: one item's worth on top of the buffer.
    pub const fn fertilizer_capacity(&self) -> u32 {
        self.fertilizer_per_item.saturating_add(self.fertilizer_buffer)
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            fertilizer_per_item: default_fertilizer_per_item(),
            fertilizer_buffer: default_fertilizer_buffer(),
            reservoir_capacity: default_reservoir_capacity(),
            liquid_drain_interval_ticks: default_liquid_drain_interval_ticks(),
        }
    }
}

/// Power debounce settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PowerConfig {
    /// Unpowered observations tolerated before the fault is raised.
    #[serde(default = "default_debounce_ticks")]
    pub debounce_ticks: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            debounce_ticks: default_debounce_ticks(),
        }
    }
}

/// Host loop settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Real-time milliseconds per simulation tick (0 = as fast as possible).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Number of ticks to run before stopping (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Random seed for the demo world.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Ticks between gearbox work cycles.
    #[serde(default = "default_work_interval_ticks")]
    pub work_interval_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
            seed: default_seed(),
            work_interval_ticks: default_work_interval_ticks(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
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

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_size_multiplier() -> u32 {
    2
}

const fn default_replan_interval_ticks() -> u64 {
    400
}

fn default_strategy_name() -> String {
    "arboreal".to_owned()
}

const fn default_fertilizer_per_item() -> u32 {
    2000
}

const fn default_fertilizer_buffer() -> u32 {
    200
}

const fn default_reservoir_capacity() -> u32 {
    10_000
}

const fn default_liquid_drain_interval_ticks() -> u64 {
    20
}

const fn default_debounce_ticks() -> u32 {
    4
}

const fn default_tick_interval_ms() -> u64 {
    50
}

const fn default_max_ticks() -> u64 {
    2000
}

const fn default_seed() -> u64 {
    42
}

const fn default_work_interval_ticks() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FarmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.farm.size_multiplier, 2);
        assert_eq!(config.farm.replan_interval_ticks, 400);
        assert_eq!(config.power.debounce_ticks, 4);
        assert_eq!(config.resources.reservoir_capacity, 10_000);
        assert_eq!(config.resources.fertilizer_capacity(), 2200);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
farm:
  size_multiplier: 3
  square_farms: true
  replan_interval_ticks: 200
  default_strategy: "orchard"

resources:
  fertilizer_per_item: 500
  fertilizer_buffer: 50
  reservoir_capacity: 4000
  liquid_drain_interval_ticks: 10

power:
  debounce_ticks: 2

engine:
  tick_interval_ms: 0
  max_ticks: 100
  seed: 7
  work_interval_ticks: 2

logging:
  level: "debug"
"#;

        let config = FarmConfig::parse(yaml);
        assert!(config.is_ok(), "parse failed: {config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.farm.size_multiplier, 3);
        assert!(config.farm.square_farms);
        assert_eq!(config.farm.default_strategy, "orchard");
        assert_eq!(config.resources.fertilizer_capacity(), 550);
        assert_eq!(config.power.debounce_ticks, 2);
        assert_eq!(config.engine.seed, 7);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = FarmConfig::parse("farm:\n  size_multiplier: 1\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Multiplier is overridden
        assert_eq!(config.farm.size_multiplier, 1);
        // Everything else uses defaults
        assert_eq!(config.farm.replan_interval_ticks, 400);
        assert_eq!(config.resources.fertilizer_per_item, 2000);
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(FarmConfig::parse("").ok(), Some(FarmConfig::default()));
    }

    #[test]
    fn rejects_zero_fertilizer_value() {
        let config = FarmConfig::parse("resources:\n  fertilizer_per_item: 0\n");
        assert!(matches!(config, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let config = FarmConfig::parse("farm: [unclosed");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("tillworks-config.yaml");
        if path.exists() {
            let config = FarmConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
