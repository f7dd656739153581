//! Forecast command implementation

use clap::Args;
use riskcast_forecast::TrendForecaster;
use tracing::info;

use crate::report::{ForecastReport, OutputFormat};
use crate::Result;

/// Arguments of `riskcast forecast`
#[derive(Debug, Clone, Args)]
pub struct ForecastArgs {
    /// Historical observations (comma separated)
    #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
    pub history: Vec<f64>,

    /// Number of periods to project
    #[arg(short, long)]
    pub periods: usize,

    /// Include fit metrics
    #[arg(long)]
    pub metrics: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Run the forecast command
pub fn run(args: &ForecastArgs) -> Result<()> {
    let report = build(args)?;
    super::emit(args.format, || report.to_json(), || report.render_table())
}

fn build(args: &ForecastArgs) -> Result<ForecastReport> {
    info!(
        observations = args.history.len(),
        periods = args.periods,
        "projecting trend"
    );
    let forecaster = TrendForecaster::new();
    let forecast = forecaster.forecast(&args.history, args.periods)?;
    let metrics = if args.metrics {
        Some(forecaster.model_metrics(&args.history)?)
    } else {
        None
    };
    Ok(ForecastReport { forecast, metrics })
}
