//! Error types for the simulation engine.
//!
//! Every failure is detected before the first trial is drawn, so a run
//! either completes fully or returns one of these errors with no partial
//! result.

use thiserror::Error;

/// Simulation engine errors.
///
/// # Variants
/// - `InvalidParameter`: a parameter or engine setting is outside its domain
/// - `NumericDomain`: the discount rate makes discounting undefined
///
/// # Examples
/// ```
/// use riskcast_sim::SimulationError;
///
/// let err = SimulationError::NumericDomain { discount_rate: -1.0 };
/// assert!(err.to_string().contains("discount rate"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Malformed input: unordered range, zero count, non-finite value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Discount rate of -1 divides by zero at every period t >= 1.
    #[error("Numeric domain error: discount rate {discount_rate} makes (1 + r)^t zero")]
    NumericDomain {
        /// The offending discount rate.
        discount_rate: f64,
    },
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
