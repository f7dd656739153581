//! Monte Carlo simulation engine.
//!
//! # Overview
//!
//! [`SimulationEngine::run`] coordinates:
//! 1. Parameter validation (nothing is drawn if it fails)
//! 2. Trial generation and discounting (via the crate-private trial generator)
//! 3. Aggregation into [`SimulationResult`] (via [`crate::stats`])
//! 4. Recommendation (via [`Recommendation::assess`])
//!
//! The engine holds configuration only. Each run owns its [`SimRng`], so
//! one engine can serve concurrent callers.

use tracing::debug;

use crate::cashflow::{TrialBatch, TrialGenerator};
use crate::config::EngineConfig;
use crate::error::SimulationError;
use crate::params::SimulationParameters;
use crate::recommendation::Recommendation;
use crate::result::SimulationResult;
use crate::rng::SimRng;
use crate::stats::{
    cumulative_curve, histogram, loss_probability, percentile_sorted, sorted_copy,
    SummaryStatistics,
};

/// Trials per chunk in [`SimulationEngine::run_parallel`].
///
/// Fixed so chunk boundaries, and therefore results, do not depend on the
/// size of the thread pool.
#[cfg(feature = "parallel")]
pub const PARALLEL_CHUNK_SIZE: usize = 4_096;

/// Monte Carlo NPV simulation engine.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::{EngineConfig, SimulationEngine, SimulationParameters, ValueRange};
///
/// let engine = SimulationEngine::new(EngineConfig::builder().seed(7).build().unwrap()).unwrap();
/// let params = SimulationParameters {
///     initial_investment: 40_000.0,
///     duration: 5,
///     revenue_range: ValueRange::new(15_000.0, 30_000.0),
///     cost_range: ValueRange::new(8_000.0, 15_000.0),
///     discount_rate: 0.10,
///     num_simulations: 1_000,
/// };
///
/// let result = engine.run(&params).unwrap();
/// assert_eq!(result.npv_results.len(), 1_000);
/// assert_eq!(result.histogram_data.len(), 30);
/// assert_eq!(result.cumulative_data.len(), 100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationEngine {
    config: EngineConfig,
}

impl SimulationEngine {
    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates the generator for one run: the configured seed, else entropy.
    pub fn new_rng(&self) -> SimRng {
        match self.config.seed() {
            Some(seed) => SimRng::from_seed(seed),
            None => SimRng::from_entropy(),
        }
    }

    /// Runs the simulation with a generator owned by this call.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` or `NumericDomain` from parameter validation, or
    /// `NumericDomain` if discounting overflows.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
        let mut rng = self.new_rng();
        self.run_with_rng(params, &mut rng)
    }

    /// Runs the simulation drawing from `rng`.
    ///
    /// Trials are drawn sequentially: trial 0 period 1 revenue, then cost,
    /// then period 2, and so on. The same generator state therefore always
    /// yields the same result.
    pub fn run_with_rng(
        &self,
        params: &SimulationParameters,
        rng: &mut SimRng,
    ) -> Result<SimulationResult, SimulationError> {
        params.validate()?;
        debug!(
            num_simulations = params.num_simulations,
            duration = params.duration,
            discount_rate = params.discount_rate,
            expected_net_flow = params.expected_net_flow(),
            seed = rng.seed(),
            "starting simulation run"
        );

        let generator = TrialGenerator::new(params);
        let batch = generator.simulate(
            rng,
            0,
            params.num_simulations,
            self.config.sample_trial_cap(),
        );

        ensure_finite(&batch, params.discount_rate)?;
        Ok(self.aggregate(batch))
    }

    /// Runs the simulation on the rayon pool using the configured seed,
    /// else a fresh one.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(
        &self,
        params: &SimulationParameters,
    ) -> Result<SimulationResult, SimulationError> {
        let seed = self.config.seed().unwrap_or_else(rand::random);
        self.run_parallel_with_seed(params, seed)
    }

    /// Runs the simulation on the rayon pool.
    ///
    /// Trials are split into chunks of [`PARALLEL_CHUNK_SIZE`]; chunk `k`
    /// draws from `SimRng::for_stream(seed, k)`. Trial order and sample
    /// retention match the sequential run, but the draws do not.
    #[cfg(feature = "parallel")]
    pub fn run_parallel_with_seed(
        &self,
        params: &SimulationParameters,
        seed: u64,
    ) -> Result<SimulationResult, SimulationError> {
        use rayon::prelude::*;

        params.validate()?;
        let n = params.num_simulations;
        let n_chunks = n.div_ceil(PARALLEL_CHUNK_SIZE);
        debug!(
            num_simulations = n,
            duration = params.duration,
            seed,
            n_chunks,
            "starting parallel simulation run"
        );

        let generator = TrialGenerator::new(params);
        let cap = self.config.sample_trial_cap();

        let batches: Vec<TrialBatch> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let first = chunk * PARALLEL_CHUNK_SIZE;
                let count = PARALLEL_CHUNK_SIZE.min(n - first);
                let mut rng = SimRng::for_stream(seed, chunk as u64);
                generator.simulate(&mut rng, first, count, cap)
            })
            .collect();

        let mut merged = TrialBatch {
            npvs: Vec::with_capacity(n),
            samples: Vec::new(),
        };
        for batch in batches {
            merged.npvs.extend(batch.npvs);
            merged.samples.extend(batch.samples);
        }

        ensure_finite(&merged, params.discount_rate)?;
        Ok(self.aggregate(merged))
    }

    fn aggregate(&self, batch: TrialBatch) -> SimulationResult {
        let TrialBatch { npvs, samples } = batch;

        let sorted = sorted_copy(&npvs);
        let summary = SummaryStatistics::from_samples(&npvs, &sorted);
        let prob_loss = loss_probability(&npvs);

        let (lower_p, upper_p) = self.config.interval_percentiles();
        let confidence_interval = [
            percentile_sorted(&sorted, lower_p),
            percentile_sorted(&sorted, upper_p),
        ];

        let histogram_data = histogram(
            &npvs,
            summary.min,
            summary.max,
            self.config.histogram_bins(),
        );
        let cumulative_data = cumulative_curve(&sorted, self.config.cumulative_points());

        let recommendation = Recommendation::assess(
            summary.mean,
            prob_loss,
            summary.std_dev,
            self.config.thresholds(),
        );

        debug!(
            mean_npv = summary.mean,
            std_dev = summary.std_dev,
            prob_loss,
            confidence = %recommendation.confidence,
            "simulation run complete"
        );

        SimulationResult {
            npv_results: npvs,
            mean_npv: summary.mean,
            median_npv: summary.median,
            std_dev: summary.std_dev,
            min_npv: summary.min,
            max_npv: summary.max,
            prob_loss,
            confidence_interval,
            histogram_data,
            cumulative_data,
            sample_cash_flows: samples,
            recommendation,
        }
    }
}

/// Discounting can still overflow when a tiny denominator meets a large flow.
fn ensure_finite(batch: &TrialBatch, discount_rate: f64) -> Result<(), SimulationError> {
    if batch.npvs.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SimulationError::NumericDomain { discount_rate })
    }
}

/// Runs one simulation with the default configuration and an entropy seed.
///
/// # Errors
///
/// `InvalidParameter` or `NumericDomain` from parameter validation.
pub fn run_simulation(params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
    SimulationEngine::default().run(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ValueRange;
    use crate::recommendation::Confidence;
    use approx::assert_relative_eq;

    fn demo_params() -> SimulationParameters {
        SimulationParameters {
            initial_investment: 40_000.0,
            duration: 5,
            revenue_range: ValueRange::new(15_000.0, 30_000.0),
            cost_range: ValueRange::new(8_000.0, 15_000.0),
            discount_rate: 0.10,
            num_simulations: 1_000,
        }
    }

    fn seeded(seed: u64) -> SimulationEngine {
        SimulationEngine::new(EngineConfig::builder().seed(seed).build().unwrap()).unwrap()
    }

    #[test]
    fn test_result_shape() {
        let result = seeded(42).run(&demo_params()).unwrap();

        assert_eq!(result.npv_results.len(), 1_000);
        assert_eq!(result.num_trials(), 1_000);
        assert_eq!(result.sample_cash_flows.len(), 10);
        assert_eq!(result.histogram_data.len(), 30);
        assert_eq!(result.cumulative_data.len(), 100);
        assert!(result.confidence_interval[0] <= result.confidence_interval[1]);
        assert!(result.interval_width() >= 0.0);
        for flows in &result.sample_cash_flows {
            assert_eq!(flows.len(), 6);
            assert_eq!(flows[0], -40_000.0);
        }
    }

    #[test]
    fn test_demo_is_profitable() {
        // Expected net flow 11_000 per period over 5 periods at 10%:
        // -40_000 + 11_000 * 3.7908 ≈ 1_699
        let result = seeded(42).run(&demo_params()).unwrap();
        assert!((result.mean_npv - 1_699.0).abs() < 1_000.0, "mean {}", result.mean_npv);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = seeded(99).run(&demo_params()).unwrap();
        let b = seeded(99).run(&demo_params()).unwrap();
        assert_eq!(a, b);

        let c = seeded(100).run(&demo_params()).unwrap();
        assert_ne!(a.npv_results, c.npv_results);
    }

    #[test]
    fn test_run_with_rng_matches_seeded_config() {
        let engine = SimulationEngine::default();
        let mut rng = SimRng::from_seed(5);
        let explicit = engine.run_with_rng(&demo_params(), &mut rng).unwrap();
        let configured = seeded(5).run(&demo_params()).unwrap();
        assert_eq!(explicit, configured);
    }

    #[test]
    fn test_sample_flows_match_leading_npvs() {
        let params = demo_params();
        let result = seeded(8).run(&params).unwrap();
        for (flows, &npv) in result.sample_cash_flows.iter().zip(&result.npv_results) {
            let expected = crate::net_present_value(flows, params.discount_rate).unwrap();
            assert_eq!(expected, npv);
        }
    }

    #[test]
    fn test_fewer_trials_than_sample_cap() {
        let params = SimulationParameters {
            num_simulations: 3,
            ..demo_params()
        };
        let result = seeded(1).run(&params).unwrap();
        assert_eq!(result.sample_cash_flows.len(), 3);
        assert_eq!(result.cumulative_data.len(), 100);
    }

    #[test]
    fn test_configured_sample_cap() {
        let engine = SimulationEngine::new(
            EngineConfig::builder()
                .sample_trial_cap(2)
                .seed(3)
                .build()
                .unwrap(),
        )
        .unwrap();
        let result = engine.run(&demo_params()).unwrap();
        assert_eq!(result.sample_cash_flows.len(), 2);
    }

    #[test]
    fn test_degenerate_ranges() {
        let params = SimulationParameters {
            initial_investment: 40_000.0,
            duration: 5,
            revenue_range: ValueRange::constant(20_000.0),
            cost_range: ValueRange::constant(13_000.0),
            discount_rate: 0.0,
            num_simulations: 200,
        };
        let result = seeded(11).run(&params).unwrap();

        assert!(result.npv_results.iter().all(|&v| v == -5_000.0));
        assert_eq!(result.mean_npv, -5_000.0);
        assert_eq!(result.std_dev, 0.0);
        assert_eq!(result.prob_loss, 1.0);
        assert_eq!(result.confidence_interval, [-5_000.0, -5_000.0]);
        assert_eq!(result.histogram_data[0].count, 200);
        assert!(result.histogram_data.iter().all(|b| b.center == -5_000.0));
        assert_eq!(result.recommendation.confidence, Confidence::VeryLow);
    }

    #[test]
    fn test_invalid_params_fail_before_drawing() {
        let params = SimulationParameters {
            cost_range: ValueRange::new(2.0, 1.0),
            ..demo_params()
        };
        assert!(matches!(
            seeded(1).run(&params),
            Err(SimulationError::InvalidParameter { .. })
        ));

        let params = SimulationParameters {
            discount_rate: -1.0,
            ..demo_params()
        };
        assert!(matches!(
            seeded(1).run(&params),
            Err(SimulationError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_vanishing_discount_factor_fails_cleanly() {
        for (rate, duration, revenue) in [
            (-0.9, 400, ValueRange::new(-1.0, 1.0)),
            (-0.9, 400, ValueRange::new(1.0, 2.0)),
            (-1.5, 1_100, ValueRange::new(-1.0, 1.0)),
        ] {
            let params = SimulationParameters {
                initial_investment: 0.0,
                duration,
                revenue_range: revenue,
                cost_range: ValueRange::constant(0.0),
                discount_rate: rate,
                num_simulations: 50,
            };
            assert_eq!(
                seeded(1).run(&params),
                Err(SimulationError::NumericDomain {
                    discount_rate: rate
                })
            );
        }
    }

    #[test]
    fn test_discounting_overflow_fails_cleanly() {
        // 0.5^1000 ≈ 9.3e-302 is normal, but 1e300 / 9.3e-302 overflows.
        let params = SimulationParameters {
            initial_investment: 0.0,
            duration: 1_000,
            revenue_range: ValueRange::constant(1.0e300),
            cost_range: ValueRange::constant(0.0),
            discount_rate: -0.5,
            num_simulations: 5,
        };
        assert!(params.validate().is_ok());
        assert!(matches!(
            seeded(1).run(&params),
            Err(SimulationError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_entropy_runs_differ() {
        let engine = SimulationEngine::default();
        let a = engine.run(&demo_params()).unwrap();
        let b = engine.run(&demo_params()).unwrap();
        assert_ne!(a.npv_results, b.npv_results);
    }

    #[test]
    fn test_run_simulation_convenience() {
        let result = run_simulation(&demo_params()).unwrap();
        assert_eq!(result.npv_results.len(), 1_000);
        assert_relative_eq!(
            result.prob_loss,
            result.npv_results.iter().filter(|&&v| v < 0.0).count() as f64 / 1_000.0
        );
    }

    #[cfg(feature = "parallel")]
    mod parallel {
        use super::*;

        #[test]
        fn test_parallel_shape_and_determinism() {
            let params = SimulationParameters {
                num_simulations: 10_000,
                ..demo_params()
            };
            let engine = SimulationEngine::default();
            let a = engine.run_parallel_with_seed(&params, 17).unwrap();
            let b = engine.run_parallel_with_seed(&params, 17).unwrap();

            assert_eq!(a, b);
            assert_eq!(a.npv_results.len(), 10_000);
            assert_eq!(a.sample_cash_flows.len(), 10);
            assert_eq!(
                a.histogram_data.iter().map(|b| b.count).sum::<usize>(),
                10_000
            );
        }

        #[test]
        fn test_parallel_first_chunk_matches_stream_zero() {
            let params = SimulationParameters {
                num_simulations: 100,
                ..demo_params()
            };
            let engine = SimulationEngine::default();
            let parallel = engine.run_parallel_with_seed(&params, 23).unwrap();
            let sequential = seeded(23).run(&params).unwrap();
            // A single chunk uses stream 0, identical to the sequential generator.
            assert_eq!(parallel, sequential);
        }

        #[test]
        fn test_parallel_validates() {
            let params = SimulationParameters {
                duration: 0,
                ..demo_params()
            };
            assert!(SimulationEngine::default()
                .run_parallel_with_seed(&params, 1)
                .is_err());
        }
    }
}
