//! Simulation output record.

use crate::recommendation::Recommendation;
use crate::stats::{CumulativePoint, HistogramBin};

/// Everything one run produces, owned by the caller.
///
/// With the `serde` feature, fields serialise in camelCase
/// (`npvResults`, `meanNpv`, `histogramData`, ...).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationResult {
    /// Per-trial NPVs in trial order.
    pub npv_results: Vec<f64>,
    /// Mean NPV.
    pub mean_npv: f64,
    /// Median NPV.
    pub median_npv: f64,
    /// Population standard deviation of NPV.
    pub std_dev: f64,
    /// Smallest NPV.
    pub min_npv: f64,
    /// Largest NPV.
    pub max_npv: f64,
    /// Fraction of trials with NPV strictly below zero.
    pub prob_loss: f64,
    /// Lower and upper percentile of the NPV distribution.
    pub confidence_interval: [f64; 2],
    /// Equal-width histogram over `[min_npv, max_npv]`.
    pub histogram_data: Vec<HistogramBin>,
    /// Resampled empirical CDF.
    pub cumulative_data: Vec<CumulativePoint>,
    /// Cash flows of the leading trials, period 0 first.
    pub sample_cash_flows: Vec<Vec<f64>>,
    /// Derived judgment.
    pub recommendation: Recommendation,
}

impl SimulationResult {
    /// Number of trials.
    #[inline]
    pub fn num_trials(&self) -> usize {
        self.npv_results.len()
    }

    /// Width of the confidence interval.
    #[inline]
    pub fn interval_width(&self) -> f64 {
        self.confidence_interval[1] - self.confidence_interval[0]
    }
}
