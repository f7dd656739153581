//! Scenario input for the `simulate` and `demo` commands.
//!
//! A scenario is the user-facing shape of a run: the discount rate is
//! given in percent and the trial count may be omitted. It is converted
//! to [`SimulationParameters`] before reaching the engine.

use riskcast_sim::{SimulationParameters, ValueRange};
use serde::Deserialize;
use std::path::Path;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Investment scenario as read from TOML or assembled from flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub initial_investment: f64,
    pub duration: usize,
    pub min_revenue: f64,
    pub max_revenue: f64,
    pub min_cost: f64,
    pub max_cost: f64,
    /// Per-period discount rate in percent (`10.0` means 10%).
    pub discount_rate: f64,
    #[serde(default)]
    pub num_simulations: Option<usize>,
    /// Past revenues to extend over `duration` periods.
    #[serde(default)]
    pub historical_revenues: Option<Vec<f64>>,
}

impl Scenario {
    /// Built-in demonstration scenario.
    pub fn demo() -> Self {
        Self {
            initial_investment: 40_000.0,
            duration: 5,
            min_revenue: 15_000.0,
            max_revenue: 30_000.0,
            min_cost: 8_000.0,
            max_cost: 15_000.0,
            discount_rate: 10.0,
            num_simulations: Some(1_000),
            historical_revenues: Some(vec![12_000.0, 14_500.0, 16_800.0, 19_200.0, 22_000.0]),
        }
    }

    /// Parse a scenario from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Scenario(format!("Invalid scenario: {}", e)))
    }

    /// Load a scenario file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Trial count after applying the configured default and ceiling.
    pub fn resolved_simulations(&self, config: &CliConfig) -> Result<usize> {
        let n = self.num_simulations.unwrap_or(config.default_simulations);
        if n > config.max_simulations {
            return Err(CliError::InvalidArgument(format!(
                "num_simulations {} exceeds the configured maximum of {}",
                n, config.max_simulations
            )));
        }
        Ok(n)
    }

    /// Engine parameters, with the discount rate converted to a decimal.
    pub fn to_parameters(&self, config: &CliConfig) -> Result<SimulationParameters> {
        let params = SimulationParameters {
            initial_investment: self.initial_investment,
            duration: self.duration,
            revenue_range: ValueRange::new(self.min_revenue, self.max_revenue),
            cost_range: ValueRange::new(self.min_cost, self.max_cost),
            discount_rate: self.discount_rate / 100.0,
            num_simulations: self.resolved_simulations(config)?,
        };
        params.validate()?;
        Ok(params)
    }
}
