//! Error types for trend forecasting.

use thiserror::Error;

/// Minimum number of observations needed to fit a line.
pub const MIN_OBSERVATIONS: usize = 2;

/// Longest horizon a single forecast may project.
pub const MAX_FORECAST_PERIODS: usize = 10_000;

/// Forecasting errors.
///
/// # Examples
/// ```
/// use riskcast_forecast::ForecastError;
///
/// let err = ForecastError::InsufficientData { required: 2, actual: 1 };
/// assert!(err.to_string().contains("at least 2"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ForecastError {
    /// Fewer observations than a line fit requires.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Observations required.
        required: usize,
        /// Observations supplied.
        actual: usize,
    },

    /// NaN or infinite observation.
    #[error("Non-finite observation at index {index}: {value}")]
    NonFiniteObservation {
        /// Position in the series.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Requested horizon longer than [`MAX_FORECAST_PERIODS`].
    #[error("Forecast horizon too long: {periods} periods, at most {max} allowed")]
    HorizonTooLong {
        /// Periods requested.
        periods: usize,
        /// Largest accepted horizon.
        max: usize,
    },
}
