//! Trend projection and fit-quality metrics.

use tracing::debug;

use crate::error::{ForecastError, MAX_FORECAST_PERIODS};
use crate::trend::LinearTrend;

/// Fit-quality summary of a [`LinearTrend`] on its own series.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelMetrics {
    /// Coefficient of determination, `1 - SS_res / SS_tot`.
    ///
    /// A constant series is reported as `1.0`: the flat fitted line
    /// reproduces it exactly.
    pub r_squared: f64,
    /// Mean squared residual.
    pub mse: f64,
    /// Fitted slope.
    pub trend: f64,
    /// Fitted intercept.
    pub intercept: f64,
}

/// Stateless linear trend forecaster.
///
/// Every call refits on the series it is given; nothing is cached between
/// calls, so a single forecaster may be shared freely.
///
/// # Examples
///
/// ```rust
/// use riskcast_forecast::TrendForecaster;
///
/// let forecaster = TrendForecaster::new();
/// let revenues = [12_000.0, 14_500.0, 16_800.0, 19_200.0, 22_000.0];
///
/// let next = forecaster.forecast(&revenues, 2).unwrap();
/// assert_eq!(next.len(), 2);
/// assert!(next[0] > 22_000.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TrendForecaster;

impl TrendForecaster {
    /// Creates a forecaster.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Fits the series and projects `periods` values past its end.
    ///
    /// # Errors
    ///
    /// `InsufficientData` for fewer than two observations,
    /// `NonFiniteObservation` for NaN or infinite values,
    /// `HorizonTooLong` for more than [`MAX_FORECAST_PERIODS`] periods.
    pub fn forecast(&self, historical: &[f64], periods: usize) -> Result<Vec<f64>, ForecastError> {
        let trend = LinearTrend::fit(historical)?;
        if periods > MAX_FORECAST_PERIODS {
            return Err(ForecastError::HorizonTooLong {
                periods,
                max: MAX_FORECAST_PERIODS,
            });
        }
        debug!(
            observations = historical.len(),
            periods,
            slope = trend.slope(),
            intercept = trend.intercept(),
            "fitted trend for forecast"
        );
        Ok(trend.project(periods))
    }

    /// Fits the series and reports R², MSE, slope and intercept.
    ///
    /// # Errors
    ///
    /// Same as [`TrendForecaster::forecast`].
    pub fn model_metrics(&self, historical: &[f64]) -> Result<ModelMetrics, ForecastError> {
        let trend = LinearTrend::fit(historical)?;
        let n = historical.len() as f64;

        let ss_res: f64 = historical
            .iter()
            .zip(trend.fitted_values())
            .map(|(&y, fitted)| (y - fitted).powi(2))
            .sum();

        let r_squared = if historical.iter().all(|&y| y == historical[0]) {
            1.0
        } else {
            let y_mean = historical.iter().sum::<f64>() / n;
            let ss_tot: f64 = historical.iter().map(|&y| (y - y_mean).powi(2)).sum();
            1.0 - ss_res / ss_tot
        };

        Ok(ModelMetrics {
            r_squared,
            mse: ss_res / n,
            trend: trend.slope(),
            intercept: trend.intercept(),
        })
    }
}

/// [`TrendForecaster::forecast`] on a default forecaster.
pub fn forecast(historical: &[f64], periods: usize) -> Result<Vec<f64>, ForecastError> {
    TrendForecaster::new().forecast(historical, periods)
}

/// [`TrendForecaster::model_metrics`] on a default forecaster.
pub fn model_metrics(historical: &[f64]) -> Result<ModelMetrics, ForecastError> {
    TrendForecaster::new().model_metrics(historical)
}
