//! Simulated annealing over the Raup parameter space.
//!
//! One sequential Markov chain:
//! - start from a random state (or a caller-provided one)
//! - propose a neighbour by nudging one field with Gaussian noise
//! - accept by the Metropolis rule at the current temperature
//! - cool geometrically from `max_temperature` to `min_temperature` over the
//!   iteration budget
//!
//! The result is the last accepted state, not the best one seen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::domain::{AnnealConfig, CostMode, ReferenceCurve};
use crate::error::AppError;
use crate::fit::scorer::{rmse, score};
use crate::models::{RaupField, RaupState};

/// Maps `x ∈ [0, max_domain]` onto `[min_range, max_range]` geometrically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricScale {
    base: f64,
    max_range: f64,
}

impl GeometricScale {
    pub fn new(max_domain: usize, min_range: f64, max_range: f64) -> Self {
        let base = (min_range / max_range).powf(1.0 / max_domain as f64);
        Self { base, max_range }
    }

    /// `max_range · base^x`
    pub fn scale(&self, x: usize) -> f64 {
        self.max_range * self.base.powf(x as f64)
    }
}

/// Metropolis acceptance probability for moving from cost `old` to `new`.
pub fn accept(old: f64, new: f64, temperature: f64) -> f64 {
    if new < old {
        1.0
    } else {
        (-(new - old) / temperature).exp()
    }
}

/// Result of one annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealOutcome {
    pub state: RaupState,
    pub cost: f64,
    pub initial_state: RaupState,
    pub initial_cost: f64,
    /// Number of proposals taken (downhill or uphill).
    pub accepted: usize,
    pub iterations: usize,
}

pub struct SimulatedAnnealing<'a> {
    reference: &'a ReferenceCurve,
    config: &'a AnnealConfig,
    schedule: GeometricScale,
    rng: StdRng,
    step: Normal<f64>,
}

impl<'a> SimulatedAnnealing<'a> {
    pub fn new(reference: &'a ReferenceCurve, config: &'a AnnealConfig) -> Result<Self, AppError> {
        config.validate()?;
        let step = Normal::new(0.0, config.step_std)
            .map_err(|e| AppError::new(4, format!("Step distribution error: {e}")))?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            reference,
            config,
            schedule: GeometricScale::new(config.iterations, config.min_temperature, config.max_temperature),
            rng,
            step,
        })
    }

    /// Cost of `state` under the configured [`CostMode`].
    pub fn cost(&self, state: &RaupState) -> f64 {
        match self.config.cost {
            CostMode::Sampled => rmse(self.reference.points(), &state.sampled_points(self.reference)),
            CostMode::ArcLength => score(state, self.reference),
        }
    }

    pub fn temperature(&self, iteration: usize) -> f64 {
        self.schedule.scale(iteration)
    }

    fn neighbour(&mut self, state: &RaupState) -> RaupState {
        let field = RaupField::ALL[self.rng.gen_range(0..RaupField::ALL.len())];
        let shift = self.step.sample(&mut self.rng);
        state.perturbed(field, shift)
    }

    /// Run the chain from a random initial state.
    pub fn minimise(&mut self) -> AnnealOutcome {
        let initial = RaupState::random(&mut self.rng);
        self.minimise_from(initial)
    }

    pub fn minimise_from(&mut self, initial: RaupState) -> AnnealOutcome {
        let initial_cost = self.cost(&initial);
        let mut state = initial;
        let mut cost = initial_cost;
        let mut accepted = 0;

        for k in 0..self.config.iterations {
            let temperature = self.temperature(k);
            let candidate = self.neighbour(&state);
            let candidate_cost = self.cost(&candidate);

            if accept(cost, candidate_cost, temperature) > self.rng.r#gen::<f64>() {
                state = candidate;
                cost = candidate_cost;
                accepted += 1;
            }

            if self.config.log_every > 0 && k % self.config.log_every == 0 {
                debug!(iteration = k, temperature, cost, accepted, %state, "annealing");
            }
        }

        AnnealOutcome {
            state,
            cost,
            initial_state: initial,
            initial_cost,
            accepted,
            iterations: self.config.iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point3;

    fn sampled_reference(truth: &RaupState) -> ReferenceCurve {
        let points = (0..60)
            .map(|i| truth.sample_point(i as f64 * 0.2))
            .collect::<Vec<Point3>>();
        ReferenceCurve::new(points).unwrap()
    }

    fn config(iterations: usize, seed: u64) -> AnnealConfig {
        AnnealConfig {
            iterations,
            seed: Some(seed),
            log_every: 0,
            ..AnnealConfig::default()
        }
    }

    #[test]
    fn geometric_scale_spans_range() {
        let scale = GeometricScale::new(100_000, 1e-5, 1000.0);
        assert_eq!(scale.scale(0), 1000.0);
        assert!((scale.scale(100_000) - 1e-5).abs() < 1e-12);
        let mut previous = scale.scale(0);
        for x in (1..=100_000).step_by(997) {
            let current = scale.scale(x);
            assert!(current < previous, "x={x}");
            previous = current;
        }
    }

    #[test]
    fn downhill_moves_are_always_accepted() {
        assert_eq!(accept(2.0, 1.0, 1e-9), 1.0);
        assert_eq!(accept(2.0, 1.0, 1e9), 1.0);
        assert_eq!(accept(f64::INFINITY, 5.0, 1.0), 1.0);
    }

    #[test]
    fn uphill_acceptance_follows_boltzmann_factor() {
        assert!((accept(1.0, 2.0, 1.0) - (-1.0_f64).exp()).abs() < 1e-15);
        assert_eq!(accept(1.0, 1.0, 3.0), 1.0);
        assert_eq!(accept(1.0, f64::INFINITY, 1.0), 0.0);
        // A hot chain takes almost anything; a cold one almost nothing.
        assert!(accept(1.0, 1.5, 1000.0) > 0.999);
        assert!(accept(1.0, 1.5, 1e-5) < 1e-100);
    }

    #[test]
    fn temperature_starts_hot() {
        let reference = ReferenceCurve::helix(10, 0.1).unwrap();
        let config = config(1000, 1);
        let annealer = SimulatedAnnealing::new(&reference, &config).unwrap();
        assert_eq!(annealer.temperature(0), config.max_temperature);
        assert!((annealer.temperature(1000) - config.min_temperature).abs() < 1e-12);
    }

    #[test]
    fn sampled_cost_is_zero_at_truth() {
        let truth = RaupState::new(2.5, 0.4, 0.3, 0.2, 1.5);
        let reference = sampled_reference(&truth);
        let config = config(10, 1);
        let annealer = SimulatedAnnealing::new(&reference, &config).unwrap();
        assert!(annealer.cost(&truth) < 1e-12);
        assert!(annealer.cost(&truth.perturbed(RaupField::W, 0.5)) > 0.01);
    }

    #[test]
    fn invalid_state_costs_infinity() {
        let truth = RaupState::new(2.5, 0.4, 0.3, 0.2, 1.5);
        let reference = sampled_reference(&truth);
        let config = config(10, 1);
        let annealer = SimulatedAnnealing::new(&reference, &config).unwrap();
        // Negative growth factor: fractional powers are NaN.
        let broken = RaupState::new(-1.0, 0.4, 0.3, 0.2, 1.5);
        assert_eq!(annealer.cost(&broken), f64::INFINITY);
    }

    #[test]
    fn same_seed_same_run() {
        let truth = RaupState::new(2.5, 0.4, 0.3, 0.2, 1.5);
        let reference = sampled_reference(&truth);
        let config = config(2000, 42);
        let first = SimulatedAnnealing::new(&reference, &config).unwrap().minimise();
        let second = SimulatedAnnealing::new(&reference, &config).unwrap().minimise();
        assert_eq!(first, second);
        assert_eq!(first.iterations, 2000);
        assert!(first.accepted <= first.iterations);
    }

    #[test]
    fn cold_chain_only_improves() {
        let truth = RaupState::new(2.5, 0.4, 0.3, 0.2, 1.5);
        let reference = sampled_reference(&truth);
        let config = AnnealConfig {
            max_temperature: 1e-10,
            min_temperature: 1e-12,
            step_std: 0.05,
            ..config(3000, 9)
        };
        let start = truth.perturbed(RaupField::R0, 0.3).perturbed(RaupField::Y0, -0.2);
        let outcome = SimulatedAnnealing::new(&reference, &config)
            .unwrap()
            .minimise_from(start);
        assert_eq!(outcome.initial_state, start);
        assert!(outcome.accepted > 0);
        assert!(outcome.cost < outcome.initial_cost * 0.5, "{outcome:?}");
    }

    #[test]
    fn arc_length_cost_scores_cartesian_trace() {
        let truth = RaupState::new(1.5, 1.0, 0.2, 0.3, 0.8);
        let points: Vec<Point3> = (0..40)
            .map(|i| crate::models::CurveModel::position(&truth, i as f64 * 0.15))
            .collect();
        let reference = ReferenceCurve::new(points).unwrap();
        let config = AnnealConfig {
            cost: CostMode::ArcLength,
            ..config(10, 3)
        };
        let annealer = SimulatedAnnealing::new(&reference, &config).unwrap();
        assert!(annealer.cost(&truth) < 1e-3);
    }

    #[test]
    fn bad_configuration_is_rejected() {
        let reference = ReferenceCurve::helix(10, 0.1).unwrap();
        let config = AnnealConfig {
            step_std: -1.0,
            ..AnnealConfig::default()
        };
        let err = SimulatedAnnealing::new(&reference, &config).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }
}
