//! Riskcast CLI - Monte Carlo investment risk from the command line
//!
//! # Commands
//!
//! - `riskcast simulate` - Simulate NPV for a scenario (flags or TOML file)
//! - `riskcast forecast --history <v,...> --periods <n>` - Project a linear trend
//! - `riskcast demo` - Run the built-in demonstration scenario
//!
//! Results go to stdout (JSON or a table); logs go to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod report;
mod scenario;

pub use error::{CliError, Result};

use commands::forecast::ForecastArgs;
use commands::simulate::SimulateArgs;
use config::LogLevel;
use report::OutputFormat;

/// Riskcast investment risk CLI
#[derive(Parser)]
#[command(name = "riskcast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./riskcast.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the NPV distribution of an investment
    Simulate(SimulateArgs),

    /// Project a historical series along its least-squares trend
    Forecast(ForecastArgs),

    /// Run the built-in demonstration scenario
    Demo {
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn init_tracing(level: LogLevel, verbose: bool) {
    let fallback = if verbose {
        LogLevel::Debug
    } else {
        level
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::build_config(cli.config.as_ref())?;
    init_tracing(config.log_level, cli.verbose);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(&args, &config),
        Commands::Forecast(args) => commands::forecast::run(&args),
        Commands::Demo { seed, format } => commands::demo::run(&config, seed, format),
    }
}
