//! Demo command
//!
//! Runs the built-in scenario: 40,000 invested over 5 periods, revenue
//! 15,000..30,000, cost 8,000..15,000, 10% discount rate, 1,000 trials, and
//! a five-year revenue history projected over the horizon.

use tracing::info;

use crate::config::CliConfig;
use crate::report::OutputFormat;
use crate::scenario::Scenario;
use crate::Result;

/// Runs the demonstration scenario.
pub fn run(config: &CliConfig, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    info!("running demo scenario");
    let report = super::simulate::execute(&Scenario::demo(), config, seed, false, true)?;
    super::emit(format, || report.to_json(), || report.render_table())
}
