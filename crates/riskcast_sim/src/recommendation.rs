//! Qualitative investment recommendation derived from NPV statistics.
//!
//! Rules, evaluated in order, first match wins (`cv = |std_dev / mean|`):
//!
//! | Condition | Confidence | Severity |
//! |-----------|------------|----------|
//! | mean > 0, loss < `high_max_loss_probability`, cv < `high_max_cv` | High | success |
//! | mean > 0, loss < `medium_max_loss_probability` | Medium | primary |
//! | mean > 0 | Low | warning |
//! | otherwise | Very Low | danger |

use std::fmt;

use crate::error::SimulationError;
use crate::stats::coefficient_of_variation;

/// Confidence attached to a recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Confidence {
    /// Positive, low-risk, tightly distributed returns.
    High,
    /// Positive returns with moderate loss probability.
    Medium,
    /// Positive expected returns with significant risk.
    Low,
    /// Non-positive expected NPV.
    #[cfg_attr(feature = "serde", serde(rename = "Very Low"))]
    VeryLow,
}

impl Confidence {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic severity tag used by presentation layers for colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Green.
    Success,
    /// Blue.
    Primary,
    /// Yellow.
    Warning,
    /// Red.
    Danger,
}

impl Severity {
    /// Lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Primary => "primary",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable cut-offs for the recommendation rules.
///
/// These are domain heuristics, kept separate from the aggregation code.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendationThresholds {
    /// Loss probability must be strictly below this for High.
    pub high_max_loss_probability: f64,
    /// Coefficient of variation must be strictly below this for High.
    pub high_max_cv: f64,
    /// Loss probability must be strictly below this for Medium.
    pub medium_max_loss_probability: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            high_max_loss_probability: 0.10,
            high_max_cv: 0.5,
            medium_max_loss_probability: 0.25,
        }
    }
}

impl RecommendationThresholds {
    /// Checks that loss cut-offs are probabilities and the cv cut-off is non-negative.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("high_max_loss_probability", self.high_max_loss_probability),
            (
                "medium_max_loss_probability",
                self.medium_max_loss_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::invalid(
                    name,
                    format!("{} not in [0, 1]", value),
                ));
            }
        }
        if self.high_max_cv.is_nan() || self.high_max_cv < 0.0 {
            return Err(SimulationError::invalid(
                "high_max_cv",
                format!("{} must be non-negative", self.high_max_cv),
            ));
        }
        Ok(())
    }
}

/// Human-readable judgment on a simulated NPV distribution.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::{Confidence, Recommendation, RecommendationThresholds};
///
/// let rec = Recommendation::assess(1_000.0, 0.05, 300.0, &RecommendationThresholds::default());
/// assert_eq!(rec.confidence, Confidence::High);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// Explanation for display.
    pub text: String,
    /// Confidence level.
    pub confidence: Confidence,
    /// Severity tag.
    pub color: Severity,
}

impl Recommendation {
    /// Applies the rule table to a mean NPV, loss probability and standard deviation.
    pub fn assess(
        mean_npv: f64,
        prob_loss: f64,
        std_dev: f64,
        thresholds: &RecommendationThresholds,
    ) -> Self {
        let cv = coefficient_of_variation(mean_npv, std_dev);

        let (confidence, color, text) = if mean_npv > 0.0
            && prob_loss < thresholds.high_max_loss_probability
            && cv < thresholds.high_max_cv
        {
            (
                Confidence::High,
                Severity::Success,
                "Strong investment opportunity with good returns and low risk.",
            )
        } else if mean_npv > 0.0 && prob_loss < thresholds.medium_max_loss_probability {
            (
                Confidence::Medium,
                Severity::Primary,
                "Positive expected returns but with moderate risk levels.",
            )
        } else if mean_npv > 0.0 {
            (
                Confidence::Low,
                Severity::Warning,
                "Potential for positive returns but with significant risk.",
            )
        } else {
            (
                Confidence::VeryLow,
                Severity::Danger,
                "High probability of loss. Not recommended.",
            )
        };

        Self {
            text: text.to_string(),
            confidence,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(mean: f64, prob_loss: f64, std_dev: f64) -> Recommendation {
        Recommendation::assess(mean, prob_loss, std_dev, &RecommendationThresholds::default())
    }

    #[test]
    fn test_high_confidence() {
        let rec = assess(10_000.0, 0.05, 3_000.0);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(rec.color, Severity::Success);
        assert!(rec.text.starts_with("Strong investment"));
    }

    #[test]
    fn test_medium_when_loss_probability_moderate() {
        let rec = assess(10_000.0, 0.15, 3_000.0);
        assert_eq!(rec.confidence, Confidence::Medium);
        assert_eq!(rec.color, Severity::Primary);
    }

    #[test]
    fn test_medium_when_dispersion_high() {
        // cv = 0.8 fails the High rule even with few losses
        let rec = assess(10_000.0, 0.05, 8_000.0);
        assert_eq!(rec.confidence, Confidence::Medium);
    }

    #[test]
    fn test_low_confidence() {
        let rec = assess(10_000.0, 0.40, 3_000.0);
        assert_eq!(rec.confidence, Confidence::Low);
        assert_eq!(rec.color, Severity::Warning);
    }

    #[test]
    fn test_zero_mean_is_very_low() {
        let rec = assess(0.0, 0.0, 0.0);
        assert_eq!(rec.confidence, Confidence::VeryLow);
        assert_eq!(rec.color, Severity::Danger);
        assert_eq!(rec.text, "High probability of loss. Not recommended.");
    }

    #[test]
    fn test_negative_mean_is_very_low() {
        let rec = assess(-5.0, 0.9, 1.0);
        assert_eq!(rec.confidence, Confidence::VeryLow);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly on the cut-off does not qualify.
        assert_eq!(assess(100.0, 0.10, 10.0).confidence, Confidence::Medium);
        assert_eq!(assess(100.0, 0.05, 50.0).confidence, Confidence::Medium);
        assert_eq!(assess(100.0, 0.25, 10.0).confidence, Confidence::Low);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = RecommendationThresholds {
            high_max_loss_probability: 0.01,
            high_max_cv: 0.1,
            medium_max_loss_probability: 0.05,
        };
        let rec = Recommendation::assess(10_000.0, 0.05, 3_000.0, &strict);
        assert_eq!(rec.confidence, Confidence::Low);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(RecommendationThresholds::default().validate().is_ok());

        let bad = RecommendationThresholds {
            medium_max_loss_probability: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = RecommendationThresholds {
            high_max_cv: f64::NAN,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Confidence::VeryLow.to_string(), "Very Low");
        assert_eq!(Severity::Primary.to_string(), "primary");
    }
}
