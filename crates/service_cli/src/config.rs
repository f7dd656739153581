//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables
//! and command-line overrides.

use riskcast_sim::{EngineConfig, RecommendationThresholds, SimulationError, MAX_SIMULATIONS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "riskcast.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Upper bound on trials accepted from user input
    pub max_simulations: usize,
    /// Trial count when a scenario does not specify one
    pub default_simulations: usize,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    /// Leading trials kept verbatim in the output
    pub sample_trial_cap: usize,
    /// Histogram resolution
    pub histogram_bins: usize,
    /// Cumulative-distribution resolution
    pub cumulative_points: usize,
    /// Two-sided confidence level of the reported interval
    pub confidence_level: f64,
    /// Recommendation cut-offs
    pub thresholds: RecommendationThresholds,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            log_level: LogLevel::Info,
            max_simulations: 100_000,
            default_simulations: 1_000,
            seed: None,
            sample_trial_cap: engine.sample_trial_cap(),
            histogram_bins: engine.histogram_bins(),
            cumulative_points: engine.cumulative_points(),
            confidence_level: engine.confidence_level(),
            thresholds: *engine.thresholds(),
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Override fields from `RISKCAST_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("RISKCAST_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(max) = lookup("RISKCAST_MAX_SIMULATIONS") {
            self.max_simulations = max.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("RISKCAST_MAX_SIMULATIONS: '{}' is not a count", max))
            })?;
        }

        if let Some(seed) = lookup("RISKCAST_SEED") {
            self.seed = Some(seed.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("RISKCAST_SEED: '{}' is not a u64", seed))
            })?);
        }

        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_simulations == 0 || self.max_simulations > MAX_SIMULATIONS {
            return Err(ConfigError::InvalidValue {
                key: "max_simulations",
                reason: format!("{} not in [1, {}]", self.max_simulations, MAX_SIMULATIONS),
            });
        }
        if self.default_simulations == 0 || self.default_simulations > self.max_simulations {
            return Err(ConfigError::InvalidValue {
                key: "default_simulations",
                reason: format!(
                    "{} not in [1, max_simulations = {}]",
                    self.default_simulations, self.max_simulations
                ),
            });
        }
        self.engine_config(None)
            .map(|_| ())
            .map_err(|e| ConfigError::InvalidValue {
                key: "engine",
                reason: e.to_string(),
            })
    }

    /// Engine configuration for one run; `seed` overrides the configured seed
    pub fn engine_config(&self, seed: Option<u64>) -> Result<EngineConfig, SimulationError> {
        let mut builder = EngineConfig::builder()
            .sample_trial_cap(self.sample_trial_cap)
            .histogram_bins(self.histogram_bins)
            .cumulative_points(self.cumulative_points)
            .confidence_level(self.confidence_level)
            .thresholds(self.thresholds);
        if let Some(seed) = seed.or(self.seed) {
            builder = builder.seed(seed);
        }
        builder.build()
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments (applied by the caller)
/// 2. Environment variables
/// 3. Config file (`--config`, else `riskcast.toml` if present)
/// 4. Default values
pub fn build_config(config_file: Option<&PathBuf>) -> Result<CliConfig, ConfigError> {
    let mut config = match config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };

    config.apply_env()?;
    Ok(config)
}
