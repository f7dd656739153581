//! Investment parameters consumed by the simulation engine.

use crate::error::SimulationError;

/// Maximum number of trials per run.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Maximum number of future periods per trial.
pub const MAX_DURATION: usize = 10_000;

/// Closed interval `[min, max]` for a per-period uniform draw.
///
/// `min == max` is allowed and degenerates the draw to a constant.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::ValueRange;
///
/// let revenue = ValueRange::new(15_000.0, 30_000.0);
/// assert_eq!(revenue.midpoint(), 22_500.0);
/// assert!(!revenue.is_degenerate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl ValueRange {
    /// Creates a range. Ordering is checked by [`SimulationParameters::validate`].
    #[inline]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range with `min == max == value`.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Returns `true` when the range has zero width.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Centre of the range.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), SimulationError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SimulationError::invalid(
                name,
                format!("bounds must be finite, got [{}, {}]", self.min, self.max),
            ));
        }
        if self.min > self.max {
            return Err(SimulationError::invalid(
                name,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(SimulationError::invalid(
                name,
                format!("width of [{}, {}] overflows", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Immutable input to one simulation run.
///
/// All amounts are plain reals in the same currency unit. The discount rate
/// is a decimal fraction (`0.10` for 10%); converting a percentage is the
/// caller's job.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::{SimulationParameters, ValueRange};
///
/// let params = SimulationParameters {
///     initial_investment: 40_000.0,
///     duration: 5,
///     revenue_range: ValueRange::new(15_000.0, 30_000.0),
///     cost_range: ValueRange::new(8_000.0, 15_000.0),
///     discount_rate: 0.10,
///     num_simulations: 1_000,
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Cash outflow at time 0 (non-negative).
    pub initial_investment: f64,
    /// Number of future periods (>= 1).
    pub duration: usize,
    /// Per-period revenue range.
    pub revenue_range: ValueRange,
    /// Per-period cost range.
    pub cost_range: ValueRange,
    /// Per-period discount rate, decimal form. May be zero or negative.
    pub discount_rate: f64,
    /// Number of independent trials (>= 1).
    pub num_simulations: usize,
}

impl SimulationParameters {
    /// Validates every field.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a negative or non-finite investment, a
    ///   duration or trial count of zero or above the engine limits, an
    ///   unordered or non-finite range, or a non-finite discount rate
    /// - `NumericDomain` when `(1 + discount_rate)^t` is zero, subnormal or
    ///   infinite for some period `t <= duration`, including `discount_rate == -1`
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.initial_investment.is_finite() || self.initial_investment < 0.0 {
            return Err(SimulationError::invalid(
                "initial_investment",
                format!(
                    "must be finite and non-negative, got {}",
                    self.initial_investment
                ),
            ));
        }
        if self.duration == 0 || self.duration > MAX_DURATION {
            return Err(SimulationError::invalid(
                "duration",
                format!("{} not in range [1, {}]", self.duration, MAX_DURATION),
            ));
        }
        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            return Err(SimulationError::invalid(
                "num_simulations",
                format!(
                    "{} not in range [1, {}]",
                    self.num_simulations, MAX_SIMULATIONS
                ),
            ));
        }
        self.revenue_range.validate("revenue_range")?;
        self.cost_range.validate("cost_range")?;

        if !self.discount_rate.is_finite() {
            return Err(SimulationError::invalid(
                "discount_rate",
                format!("must be finite, got {}", self.discount_rate),
            ));
        }
        // |1 + r|^t is monotone in t, so the last period bounds every denominator.
        let horizon = (1.0 + self.discount_rate).powi(self.duration as i32);
        if !horizon.is_normal() {
            return Err(SimulationError::NumericDomain {
                discount_rate: self.discount_rate,
            });
        }
        Ok(())
    }

    /// Net cash flow per period when both ranges collapse to their midpoints.
    #[inline]
    pub fn expected_net_flow(&self) -> f64 {
        self.revenue_range.midpoint() - self.cost_range.midpoint()
    }
}
