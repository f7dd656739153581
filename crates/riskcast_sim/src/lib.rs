//! # Riskcast Simulation Engine
//!
//! Monte Carlo estimation of an investment's NPV distribution.
//!
//! Each trial draws per-period revenue and cost from independent uniform
//! ranges, discounts the resulting cash flows, and records one NPV. The
//! trials are then summarised into location and spread statistics, a
//! confidence interval, a histogram, a resampled cumulative distribution and
//! a qualitative [`Recommendation`].
//!
//! ## Usage Example
//!
//! ```rust
//! use riskcast_sim::{run_simulation, SimulationParameters, ValueRange};
//!
//! let params = SimulationParameters {
//!     initial_investment: 40_000.0,
//!     duration: 5,
//!     revenue_range: ValueRange::new(15_000.0, 30_000.0),
//!     cost_range: ValueRange::new(8_000.0, 15_000.0),
//!     discount_rate: 0.10,
//!     num_simulations: 1_000,
//! };
//!
//! let result = run_simulation(&params).unwrap();
//! println!(
//!     "mean NPV {:.0}, P(loss) {:.1}%, {}",
//!     result.mean_npv,
//!     result.prob_loss * 100.0,
//!     result.recommendation.confidence
//! );
//! ```
//!
//! ## Features
//!
//! - `parallel`: [`SimulationEngine::run_parallel`] on the rayon pool
//! - `serde`: `Serialize`/`Deserialize` for parameters and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod cashflow;
pub mod config;
pub mod engine;
pub mod error;
pub mod params;
pub mod recommendation;
pub mod result;
pub mod rng;
pub mod stats;

pub use cashflow::net_present_value;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::{run_simulation, SimulationEngine};
pub use error::SimulationError;
pub use params::{SimulationParameters, ValueRange, MAX_DURATION, MAX_SIMULATIONS};
pub use recommendation::{Confidence, Recommendation, RecommendationThresholds, Severity};
pub use result::SimulationResult;
pub use rng::SimRng;
pub use stats::{CumulativePoint, HistogramBin};

#[cfg(feature = "parallel")]
pub use engine::PARALLEL_CHUNK_SIZE;
