//! Simulate command implementation
//!
//! Runs the Monte Carlo NPV engine on a scenario assembled from a TOML file
//! and/or flags, optionally extending a revenue history over the horizon.

use clap::Args;
use riskcast_forecast::TrendForecaster;
use riskcast_sim::{SimRng, SimulationEngine};
use std::path::PathBuf;
use tracing::info;

use crate::config::CliConfig;
use crate::report::{OutputFormat, SimulationReport};
use crate::scenario::Scenario;
use crate::{CliError, Result};

/// Arguments of `riskcast simulate`
#[derive(Debug, Clone, Default, Args)]
pub struct SimulateArgs {
    /// Scenario file (TOML); flags below override its fields
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Cash outflow at time 0
    #[arg(long)]
    pub initial_investment: Option<f64>,

    /// Number of future periods
    #[arg(short, long)]
    pub duration: Option<usize>,

    /// Lower bound of per-period revenue
    #[arg(long, allow_hyphen_values = true)]
    pub min_revenue: Option<f64>,

    /// Upper bound of per-period revenue
    #[arg(long, allow_hyphen_values = true)]
    pub max_revenue: Option<f64>,

    /// Lower bound of per-period cost
    #[arg(long, allow_hyphen_values = true)]
    pub min_cost: Option<f64>,

    /// Upper bound of per-period cost
    #[arg(long, allow_hyphen_values = true)]
    pub max_cost: Option<f64>,

    /// Per-period discount rate in percent (10 means 10%)
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub discount_rate: Option<f64>,

    /// Number of Monte Carlo trials
    #[arg(short, long)]
    pub num_simulations: Option<usize>,

    /// Historical revenues to forecast over the horizon (comma separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub history: Vec<f64>,

    /// Include forecast fit metrics in the output
    #[arg(long)]
    pub metrics: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run trials on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl SimulateArgs {
    /// Builds the scenario from the file, if any, then applies flag overrides.
    pub fn to_scenario(&self) -> Result<Scenario> {
        match &self.scenario {
            Some(path) => {
                let mut scenario = Scenario::from_file(path)?;
                self.apply_overrides(&mut scenario);
                Ok(scenario)
            }
            None => self.scenario_from_flags(),
        }
    }

    fn apply_overrides(&self, s: &mut Scenario) {
        if let Some(v) = self.initial_investment {
            s.initial_investment = v;
        }
        if let Some(v) = self.duration {
            s.duration = v;
        }
        if let Some(v) = self.min_revenue {
            s.min_revenue = v;
        }
        if let Some(v) = self.max_revenue {
            s.max_revenue = v;
        }
        if let Some(v) = self.min_cost {
            s.min_cost = v;
        }
        if let Some(v) = self.max_cost {
            s.max_cost = v;
        }
        if let Some(v) = self.discount_rate {
            s.discount_rate = v;
        }
        if self.num_simulations.is_some() {
            s.num_simulations = self.num_simulations;
        }
        if !self.history.is_empty() {
            s.historical_revenues = Some(self.history.clone());
        }
    }

    fn scenario_from_flags(&self) -> Result<Scenario> {
        let missing: Vec<&str> = [
            ("--initial-investment", self.initial_investment.is_none()),
            ("--duration", self.duration.is_none()),
            ("--min-revenue", self.min_revenue.is_none()),
            ("--max-revenue", self.max_revenue.is_none()),
            ("--min-cost", self.min_cost.is_none()),
            ("--max-cost", self.max_cost.is_none()),
            ("--discount-rate", self.discount_rate.is_none()),
        ]
        .into_iter()
        .filter_map(|(flag, absent)| absent.then_some(flag))
        .collect();

        if !missing.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "missing {} (or pass --scenario)",
                missing.join(", ")
            )));
        }

        Ok(Scenario {
            initial_investment: self.initial_investment.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            min_revenue: self.min_revenue.unwrap_or_default(),
            max_revenue: self.max_revenue.unwrap_or_default(),
            min_cost: self.min_cost.unwrap_or_default(),
            max_cost: self.max_cost.unwrap_or_default(),
            discount_rate: self.discount_rate.unwrap_or_default(),
            num_simulations: self.num_simulations,
            historical_revenues: (!self.history.is_empty()).then(|| self.history.clone()),
        })
    }
}

/// Run the simulate command
pub fn run(args: &SimulateArgs, config: &CliConfig) -> Result<()> {
    let scenario = args.to_scenario()?;
    let report = execute(&scenario, config, args.seed, args.parallel, args.metrics)?;
    super::emit(args.format, || report.to_json(), || report.render_table())
}

/// Runs one scenario end to end and merges the forecast into the result.
pub fn execute(
    scenario: &Scenario,
    config: &CliConfig,
    seed: Option<u64>,
    parallel: bool,
    with_metrics: bool,
) -> Result<SimulationReport> {
    let params = scenario.to_parameters(config)?;
    let seed = seed
        .or(config.seed)
        .unwrap_or_else(|| SimRng::from_entropy().seed());

    info!(
        num_simulations = params.num_simulations,
        duration = params.duration,
        seed,
        parallel,
        "running simulation"
    );

    let engine = SimulationEngine::new(config.engine_config(Some(seed))?)?;
    let result = if parallel {
        engine.run_parallel_with_seed(&params, seed)?
    } else {
        engine.run(&params)?
    };

    let (revenues_forecast, forecast_metrics) = match &scenario.historical_revenues {
        Some(history) => {
            let forecaster = TrendForecaster::new();
            let forecast = forecaster.forecast(history, params.duration)?;
            let metrics = if with_metrics {
                Some(forecaster.model_metrics(history)?)
            } else {
                None
            };
            (Some(forecast), metrics)
        }
        None => (None, None),
    };

    info!(
        mean_npv = result.mean_npv,
        prob_loss = result.prob_loss,
        confidence = result.recommendation.confidence.as_str(),
        "simulation complete"
    );

    Ok(SimulationReport {
        result,
        revenues_forecast,
        forecast_metrics,
        seed,
    })
}
