//! Ordinary least-squares line over a positionally indexed series.
//!
//! The independent variable is the observation's position `0, 1, 2, ...`,
//! the dependent variable its value. Closed-form fit:
//!
//! ```text
//! slope     = Σ (x - x̄)(y - ȳ) / Σ (x - x̄)²
//! intercept = ȳ - slope · x̄
//! ```

use crate::error::{ForecastError, MIN_OBSERVATIONS};

/// Fitted line `y = intercept + slope · x`.
///
/// # Examples
///
/// ```rust
/// use riskcast_forecast::LinearTrend;
///
/// let trend = LinearTrend::fit(&[1.0, 3.0, 5.0]).unwrap();
/// assert_eq!(trend.slope(), 2.0);
/// assert_eq!(trend.intercept(), 1.0);
/// assert_eq!(trend.predict(3.0), 7.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearTrend {
    slope: f64,
    intercept: f64,
    n_observations: usize,
}

impl LinearTrend {
    /// Fits the least-squares line to `values` against their positions.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` for fewer than two observations
    /// - `NonFiniteObservation` for a NaN or infinite value
    pub fn fit(values: &[f64]) -> Result<Self, ForecastError> {
        validate_series(values)?;

        let n = values.len();
        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n as f64;

        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (i, &y)| {
                let dx = i as f64 - x_mean;
                (sxy + dx * (y - y_mean), sxx + dx * dx)
            });

        // sxx > 0 whenever n >= 2 since positions are distinct.
        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        Ok(Self {
            slope,
            intercept,
            n_observations: n,
        })
    }

    /// Change in value per period.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted value at position 0.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of observations the line was fitted to.
    #[inline]
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Value of the line at position `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Line values at the fitted positions `0 .. n_observations`.
    pub fn fitted_values(&self) -> Vec<f64> {
        (0..self.n_observations)
            .map(|i| self.predict(i as f64))
            .collect()
    }

    /// Line values at the `periods` positions following the fitted series.
    ///
    /// Positions stop at `usize::MAX`; [`crate::TrendForecaster`] bounds the
    /// horizon before calling this.
    pub fn project(&self, periods: usize) -> Vec<f64> {
        let start = self.n_observations;
        (start..start.saturating_add(periods))
            .map(|i| self.predict(i as f64))
            .collect()
    }
}

pub(crate) fn validate_series(values: &[f64]) -> Result<(), ForecastError> {
    if values.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: values.len(),
        });
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ForecastError::NonFiniteObservation { index, value });
    }
    Ok(())
}
