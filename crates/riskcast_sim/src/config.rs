//! Simulation engine configuration.
//!
//! Output-shaping constants (sample cap, histogram resolution, curve
//! resolution, confidence level) and the recommendation cut-offs live here
//! rather than in the aggregation code.

use crate::error::SimulationError;
use crate::recommendation::RecommendationThresholds;

/// Default number of leading trials retained verbatim.
pub const DEFAULT_SAMPLE_TRIAL_CAP: usize = 10;

/// Default histogram bin count.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Default number of resampled cumulative-distribution points.
pub const DEFAULT_CUMULATIVE_POINTS: usize = 100;

/// Default two-sided confidence level of the reported interval.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Immutable engine configuration.
///
/// Use [`EngineConfigBuilder`] to construct non-default instances.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .histogram_bins(50)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.histogram_bins(), 50);
/// assert_eq!(config.sample_trial_cap(), 10);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    sample_trial_cap: usize,
    histogram_bins: usize,
    cumulative_points: usize,
    confidence_level: f64,
    thresholds: RecommendationThresholds,
    seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_trial_cap: DEFAULT_SAMPLE_TRIAL_CAP,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            cumulative_points: DEFAULT_CUMULATIVE_POINTS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            thresholds: RecommendationThresholds::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Number of leading trials whose cash flows are kept.
    #[inline]
    pub fn sample_trial_cap(&self) -> usize {
        self.sample_trial_cap
    }

    /// Histogram bin count.
    #[inline]
    pub fn histogram_bins(&self) -> usize {
        self.histogram_bins
    }

    /// Cumulative-distribution resolution.
    #[inline]
    pub fn cumulative_points(&self) -> usize {
        self.cumulative_points
    }

    /// Two-sided confidence level, e.g. `0.95`.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Recommendation cut-offs.
    #[inline]
    pub fn thresholds(&self) -> &RecommendationThresholds {
        &self.thresholds
    }

    /// Fixed seed, if any. `None` means each run draws a fresh seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Lower and upper percentiles (0 to 100) bounding the confidence interval.
    #[inline]
    pub fn interval_percentiles(&self) -> (f64, f64) {
        // Scale first so 0.95 maps to exactly 2.5 / 97.5.
        let tail = (100.0 - self.confidence_level * 100.0) / 2.0;
        (tail, 100.0 - tail)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `histogram_bins` or `cumulative_points` is 0
    /// - `confidence_level` is outside the open interval (0, 1)
    /// - a recommendation threshold is out of range
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.histogram_bins == 0 {
            return Err(SimulationError::invalid(
                "histogram_bins",
                "must be at least 1",
            ));
        }
        if self.cumulative_points == 0 {
            return Err(SimulationError::invalid(
                "cumulative_points",
                "must be at least 1",
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(SimulationError::invalid(
                "confidence_level",
                format!("{} not in (0, 1)", self.confidence_level),
            ));
        }
        self.thresholds.validate()
    }
}

/// Builder for [`EngineConfig`]. Unset fields keep their defaults.
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    sample_trial_cap: Option<usize>,
    histogram_bins: Option<usize>,
    cumulative_points: Option<usize>,
    confidence_level: Option<f64>,
    thresholds: Option<RecommendationThresholds>,
    seed: Option<u64>,
}

impl EngineConfigBuilder {
    /// Sets how many leading trials are kept verbatim (0 keeps none).
    #[inline]
    pub fn sample_trial_cap(mut self, cap: usize) -> Self {
        self.sample_trial_cap = Some(cap);
        self
    }

    /// Sets the histogram bin count.
    #[inline]
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Sets the cumulative-distribution resolution.
    #[inline]
    pub fn cumulative_points(mut self, points: usize) -> Self {
        self.cumulative_points = Some(points);
        self
    }

    /// Sets the two-sided confidence level.
    #[inline]
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = Some(level);
        self
    }

    /// Sets the recommendation cut-offs.
    #[inline]
    pub fn thresholds(mut self, thresholds: RecommendationThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Fixes the seed for reproducible runs.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<EngineConfig, SimulationError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            sample_trial_cap: self.sample_trial_cap.unwrap_or(defaults.sample_trial_cap),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            cumulative_points: self.cumulative_points.unwrap_or(defaults.cumulative_points),
            confidence_level: self.confidence_level.unwrap_or(defaults.confidence_level),
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_trial_cap(), 10);
        assert_eq!(config.histogram_bins(), 30);
        assert_eq!(config.cumulative_points(), 100);
        assert_eq!(config.confidence_level(), 0.95);
        assert_eq!(config.seed(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_matches_default() {
        assert_eq!(EngineConfig::builder().build().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_interval_percentiles() {
        let (lo, hi) = EngineConfig::default().interval_percentiles();
        assert_relative_eq!(lo, 2.5, epsilon = 1e-9);
        assert_relative_eq!(hi, 97.5, epsilon = 1e-9);

        let config = EngineConfig::builder()
            .confidence_level(0.90)
            .build()
            .unwrap();
        let (lo, hi) = config.interval_percentiles();
        assert_relative_eq!(lo, 5.0, epsilon = 1e-9);
        assert_relative_eq!(hi, 95.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_bins_rejected() {
        let result = EngineConfig::builder().histogram_bins(0).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "histogram_bins",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_points_rejected() {
        assert!(EngineConfig::builder().cumulative_points(0).build().is_err());
    }

    #[test]
    fn test_confidence_level_bounds() {
        for level in [0.0, 1.0, -0.2, f64::NAN] {
            assert!(
                EngineConfig::builder().confidence_level(level).build().is_err(),
                "level {} accepted",
                level
            );
        }
    }

    #[test]
    fn test_zero_sample_cap_allowed() {
        let config = EngineConfig::builder().sample_trial_cap(0).build().unwrap();
        assert_eq!(config.sample_trial_cap(), 0);
    }
}
