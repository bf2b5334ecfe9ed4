//! Configuration loading and typed config structures for the Life engine.
//!
//! The canonical configuration lives in `life-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty or missing file is valid.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
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

/// Top-level configuration.
///
/// Mirrors the structure of `life-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LifeConfig {
    /// Grid dimensions and seeding.
    #[serde(default)]
    pub grid: GridConfig,

    /// Run loop cadence and bounds.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Observer HTTP server settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LifeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `LIFE_OBSERVER_PORT` overrides `observer.port`
    /// - `LIFE_LOG_LEVEL` overrides `logging.level`
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

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override selected values with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var("LIFE_OBSERVER_PORT")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            self.observer.port = port;
        }
        if let Ok(level) = std::env::var("LIFE_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero grid dimensions, a density
    /// outside `[0, 1]`, or a zero tick interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "grid must be at least 1x1, got {}x{}",
                    self.grid.rows, self.grid.cols
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.grid.density) {
            return Err(ConfigError::Invalid {
                reason: format!("grid.density must be in [0, 1], got {}", self.grid.density),
            });
        }
        if self.simulation.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "simulation.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Grid dimensions and seeding parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of columns.
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Probability that a cell is alive after a randomize.
    #[serde(default = "default_density")]
    pub density: f64,

    /// Seed for the randomize generator. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            density: default_density(),
            seed: None,
        }
    }
}

/// Run loop cadence and bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Real-time milliseconds between steps while running.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Generation at which the run loop ends (0 = unlimited).
    #[serde(default)]
    pub max_generations: u64,

    /// Start stepping immediately instead of waiting for a start intent.
    #[serde(default)]
    pub autostart: bool,

    /// Seed the grid randomly before the loop starts.
    #[serde(default)]
    pub randomize_on_start: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_generations: 0,
            autostart: false,
            randomize_on_start: false,
        }
    }
}

/// Observer HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Whether the observer API is served.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bind address.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_rows() -> usize {
    50
}

const fn default_cols() -> usize {
    50
}

const fn default_density() -> f64 {
    0.3
}

const fn default_tick_interval_ms() -> u64 {
    300
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_log_format() -> String {
    "pretty".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LifeConfig::default();
        assert_eq!(config.grid.rows, 50);
        assert_eq!(config.grid.cols, 50);
        assert_eq!(config.simulation.tick_interval_ms, 300);
        assert!(config.grid.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
grid:
  rows: 20
  cols: 30
  density: 0.5
  seed: 9

simulation:
  tick_interval_ms: 150
  max_generations: 1000
  autostart: true
  randomize_on_start: true

observer:
  enabled: false
  host: "127.0.0.1"
  port: 9090

logging:
  level: "debug"
  format: "json"
"#;

        let config = LifeConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.grid.rows, 20);
        assert_eq!(config.grid.cols, 30);
        assert_eq!(config.grid.seed, Some(9));
        assert_eq!(config.simulation.tick_interval_ms, 150);
        assert_eq!(config.simulation.max_generations, 1000);
        assert!(config.simulation.autostart);
        assert!(!config.observer.enabled);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = LifeConfig::parse("grid:\n  rows: 7\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.grid.rows, 7);
        // Everything else uses defaults
        assert_eq!(config.grid.cols, 50);
        assert_eq!(config.simulation.tick_interval_ms, 300);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(LifeConfig::parse("").is_ok());
    }

    #[test]
    fn rejects_zero_rows() {
        let result = LifeConfig::parse("grid:\n  rows: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_density_above_one() {
        let result = LifeConfig::parse("grid:\n  density: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let result = LifeConfig::parse("simulation:\n  tick_interval_ms: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = LifeConfig::parse("grid: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("life-config.yaml");
        if path.exists() {
            let config = LifeConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
