//! CLI error type.

use riskcast_forecast::ForecastError;
use riskcast_sim::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Forecast failed: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;
