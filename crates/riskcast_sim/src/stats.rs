//! Distribution statistics over per-trial NPVs.
//!
//! # Conventions
//!
//! Different statistics packages disagree on percentile and binning
//! defaults. This module uses:
//!
//! | Statistic | Convention |
//! |-----------|------------|
//! | Standard deviation | Population (denominator `n`) |
//! | Percentile | Linear interpolation, `rank = p/100 * (n - 1)` |
//! | Median | Percentile 50 under the same rule |
//! | Histogram | `bins` equal widths over `[min, max]`, half-open bins, last bin closed |
//! | Cumulative curve | `P(rank i) = (i + 1) / n`, resampled at `floor(linspace(0, n - 1, points))` |
//!
//! These match NumPy's `linear` percentile method and `histogram` edges.
//! All functions taking `sorted` expect ascending order without NaN.

/// Histogram bin: midpoint and number of samples.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistogramBin {
    /// Bin midpoint.
    #[cfg_attr(feature = "serde", serde(rename = "x"))]
    pub center: f64,
    /// Number of samples in the bin.
    #[cfg_attr(feature = "serde", serde(rename = "y"))]
    pub count: usize,
}

/// Point on the empirical cumulative distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CumulativePoint {
    /// Sample value.
    #[cfg_attr(feature = "serde", serde(rename = "x"))]
    pub value: f64,
    /// Fraction of samples less than or equal to `value` at this rank.
    #[cfg_attr(feature = "serde", serde(rename = "y"))]
    pub probability: f64,
}

/// Location and spread summary of a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (linear-interpolated 50th percentile).
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl SummaryStatistics {
    /// Summarises `values`; `sorted` must be the same values in ascending order.
    ///
    /// The mean is accumulated in `values` order so results do not depend on
    /// how the caller sorted.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn from_samples(values: &[f64], sorted: &[f64]) -> Self {
        assert!(!values.is_empty(), "cannot summarise an empty sample");
        debug_assert_eq!(values.len(), sorted.len());

        let n = values.len() as f64;
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let raw_mean = values.iter().sum::<f64>() / n;
        // Summation rounding can land a near-constant mean one ulp outside [min, max].
        // NaN bounds fail the comparison and leave the mean unclamped.
        let mean = if min <= max {
            raw_mean.clamp(min, max)
        } else {
            raw_mean
        };
        let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            median: percentile_sorted(sorted, 50.0),
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// `|std_dev / mean|`, or `f64::INFINITY` when `mean == 0`.
#[inline]
pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> f64 {
    if mean != 0.0 {
        (std_dev / mean).abs()
    } else {
        f64::INFINITY
    }
}

/// Returns an ascending copy of `values`.
///
/// Uses the IEEE 754 total order: negative NaN sorts first, positive NaN last.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile `p` (0 to 100) of ascending `sorted` by linear interpolation.
///
/// # Panics
///
/// Panics if `sorted` is empty.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::stats::percentile_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_sorted(&data, 50.0), 2.5);
/// assert_eq!(percentile_sorted(&data, 100.0), 4.0);
/// ```
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of an empty sample");

    let rank = p.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Fraction of `values` strictly below zero.
pub fn loss_probability(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let losses = values.iter().filter(|&&v| v < 0.0).count();
    losses as f64 / values.len() as f64
}

/// Equal-width histogram of `values` over `[min, max]`.
///
/// Returns exactly `bins` entries in ascending order. A zero-width range
/// yields `bins` coincident bins centred on `min` with all mass in the first.
pub fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }

    let width = max - min;
    if width == 0.0 {
        let mut out = vec![
            HistogramBin {
                center: min,
                count: 0,
            };
            bins
        ];
        out[0].count = values.len();
        return out;
    }

    let step = width / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + step * i as f64 })
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        if v < min || v > max {
            continue;
        }
        let mut idx = (((v - min) / width) * bins as f64) as usize;
        idx = idx.min(bins - 1);
        // Correct for rounding in the scaled index against the real edges.
        if v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            center: 0.5 * (edges[i] + edges[i + 1]),
            count,
        })
        .collect()
}

/// Empirical CDF of ascending `sorted`, resampled to `points` entries.
///
/// Indices are `floor(i * (n - 1) / (points - 1))` with the last pinned to
/// `n - 1`; they repeat when `n < points`.
pub fn cumulative_curve(sorted: &[f64], points: usize) -> Vec<CumulativePoint> {
    let n = sorted.len();
    if n == 0 || points == 0 {
        return Vec::new();
    }

    let last = n - 1;
    let step = if points > 1 {
        last as f64 / (points - 1) as f64
    } else {
        0.0
    };

    (0..points)
        .map(|i| {
            let idx = if points > 1 && i == points - 1 {
                last
            } else {
                ((i as f64 * step) as usize).min(last)
            };
            CumulativePoint {
                value: sorted[idx],
                probability: (idx + 1) as f64 / n as f64,
            }
        })
        .collect()
}
