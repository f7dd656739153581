//! # Riskcast Trend Forecaster
//!
//! Fits an ordinary least-squares line to a historical series indexed by
//! position and projects it forward. Used to extend simulation assumptions
//! (for example, revenue history) over the investment horizon.
//!
//! ## Usage Example
//!
//! ```rust
//! use riskcast_forecast::{forecast, model_metrics};
//!
//! let history = [1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! let next = forecast(&history, 3).unwrap();
//! assert!((next[0] - 6.0).abs() < 1e-9);
//!
//! let metrics = model_metrics(&history).unwrap();
//! assert!((metrics.r_squared - 1.0).abs() < 1e-12);
//! assert!((metrics.trend - 1.0).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod forecaster;
pub mod trend;

pub use error::{ForecastError, MAX_FORECAST_PERIODS, MIN_OBSERVATIONS};
pub use forecaster::{forecast, model_metrics, ModelMetrics, TrendForecaster};
pub use trend::LinearTrend;
