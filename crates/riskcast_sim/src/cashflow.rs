//! Cash-flow trial generation and NPV discounting.
//!
//! A trial is `duration + 1` flows: index 0 is `-initial_investment`, each
//! later index is one revenue draw minus one cost draw. The generator keeps
//! one reusable flow buffer per batch, so retained sample trials are the only
//! per-trial allocations.

use rand_distr::Uniform;

use crate::error::SimulationError;
use crate::params::SimulationParameters;
use crate::rng::SimRng;

/// Net present value of `cash_flows` at a per-period `discount_rate`.
///
/// `NPV = Σ cash_flows[t] / (1 + r)^t`, with `t` the index in the slice.
///
/// # Errors
///
/// `NumericDomain` when `(1 + discount_rate)^t` is zero for some flow after
/// period 0.
///
/// # Examples
///
/// ```rust
/// use riskcast_sim::net_present_value;
///
/// let npv = net_present_value(&[-100.0, 110.0], 0.10).unwrap();
/// assert!(npv.abs() < 1e-12);
/// ```
pub fn net_present_value(cash_flows: &[f64], discount_rate: f64) -> Result<f64, SimulationError> {
    let growth = 1.0 + discount_rate;
    if cash_flows.len() > 1 && growth.powi((cash_flows.len() - 1) as i32) == 0.0 {
        return Err(SimulationError::NumericDomain { discount_rate });
    }
    Ok(cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / growth.powi(t as i32))
        .sum())
}

/// Draws trials for one validated parameter set.
#[derive(Debug, Clone)]
pub(crate) struct TrialGenerator {
    initial_flow: f64,
    revenue: Uniform<f64>,
    cost: Uniform<f64>,
    /// `(1 + r)^t` for `t = 0..=duration`.
    denominators: Vec<f64>,
}

/// NPVs and retained sample flows for a contiguous block of trials.
#[derive(Debug, Default)]
pub(crate) struct TrialBatch {
    pub npvs: Vec<f64>,
    pub samples: Vec<Vec<f64>>,
}

impl TrialGenerator {
    /// Builds the generator. `params` must already be validated.
    pub fn new(params: &SimulationParameters) -> Self {
        let growth = 1.0 + params.discount_rate;
        let denominators = (0..=params.duration)
            .map(|t| growth.powi(t as i32))
            .collect();

        Self {
            initial_flow: -params.initial_investment,
            revenue: SimRng::sampler(params.revenue_range.min, params.revenue_range.max),
            cost: SimRng::sampler(params.cost_range.min, params.cost_range.max),
            denominators,
        }
    }

    #[inline]
    fn duration(&self) -> usize {
        self.denominators.len() - 1
    }

    /// Overwrites `flows` with one freshly drawn trial.
    pub fn fill_trial(&self, rng: &mut SimRng, flows: &mut Vec<f64>) {
        flows.clear();
        flows.push(self.initial_flow);
        for _ in 0..self.duration() {
            let revenue = rng.draw(&self.revenue);
            let cost = rng.draw(&self.cost);
            flows.push(revenue - cost);
        }
    }

    /// Discounts a trial produced by [`TrialGenerator::fill_trial`].
    #[inline]
    pub fn npv(&self, flows: &[f64]) -> f64 {
        flows
            .iter()
            .zip(&self.denominators)
            .map(|(&cf, &d)| cf / d)
            .sum()
    }

    /// Runs trials `first_index .. first_index + count`, retaining the flows
    /// of every trial whose global index is below `sample_cap`.
    pub fn simulate(
        &self,
        rng: &mut SimRng,
        first_index: usize,
        count: usize,
        sample_cap: usize,
    ) -> TrialBatch {
        let mut batch = TrialBatch {
            npvs: Vec::with_capacity(count),
            samples: Vec::new(),
        };
        let mut flows = Vec::with_capacity(self.denominators.len());

        for i in first_index..first_index + count {
            self.fill_trial(rng, &mut flows);
            if i < sample_cap {
                batch.samples.push(flows.clone());
            }
            batch.npvs.push(self.npv(&flows));
        }
        batch
    }
}
