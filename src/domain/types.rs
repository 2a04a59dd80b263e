//! Shared domain types.
//!
//! Points are plain `nalgebra` vectors; everything else here is either the
//! read-only reference curve or configuration/result records that can be
//! exported to JSON.

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::RaupState;

/// A position in 3-D space.
pub type Point3 = Vector3<f64>;

/// The sampled curve a model is fitted against.
///
/// Order is significant: it defines the direction the curve is travelled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    points: Vec<Point3>,
}

impl ReferenceCurve {
    /// Scoring needs a start point and at least one travelled step.
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<Point3>) -> Result<Self, AppError> {
        if points.len() < Self::MIN_POINTS {
            return Err(AppError::new(
                2,
                format!(
                    "Reference curve needs at least {} points, got {}.",
                    Self::MIN_POINTS,
                    points.len()
                ),
            ));
        }
        if let Some(i) = points.iter().position(|p| !p.iter().all(|v| v.is_finite())) {
            return Err(AppError::new(
                2,
                format!("Reference point {} has a non-finite coordinate.", i + 1),
            ));
        }
        Ok(Self { points })
    }

    /// Built-in reference: `count` samples of the unit helix `(cos t, sin t, t)` at `t = i * step`.
    pub fn helix(count: usize, step: f64) -> Result<Self, AppError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(AppError::new(2, "Invalid helix sampling step."));
        }
        let points = (0..count)
            .map(|i| {
                let t = i as f64 * step;
                Point3::new(t.cos(), t.sin(), t)
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point3 {
        self.points[0]
    }
}

/// How the annealer measures the distance between a Raup state and the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CostMode {
    /// Reference rows are `(θ, r, z)` samples; the model is evaluated at each `θ`.
    Sampled,
    /// Reference rows are Cartesian; the model is traced by arc length and aligned.
    ArcLength,
}

/// Annealing run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealConfig {
    pub iterations: usize,
    pub max_temperature: f64,
    pub min_temperature: f64,
    /// Standard deviation of the Gaussian step applied to one field per proposal.
    pub step_std: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub cost: CostMode,
    /// Emit a progress log line every this many iterations (0 disables).
    pub log_every: usize,

    /// Reference file; `None` uses the built-in helix.
    pub reference: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub export_points: Option<PathBuf>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            max_temperature: 1000.0,
            min_temperature: 0.00001,
            step_std: 0.01,
            seed: None,
            cost: CostMode::Sampled,
            log_every: 10_000,
            reference: None,
            export_json: None,
            export_points: None,
        }
    }
}

impl AnnealConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.iterations == 0 {
            return Err(AppError::new(4, "Iteration count must be > 0."));
        }
        if !(self.min_temperature.is_finite()
            && self.max_temperature.is_finite()
            && self.min_temperature > 0.0
            && self.max_temperature > self.min_temperature)
        {
            return Err(AppError::new(
                4,
                format!(
                    "Invalid temperature range: min={}, max={} (must be finite, >0, and max>min).",
                    self.min_temperature, self.max_temperature
                ),
            ));
        }
        if !(self.step_std.is_finite() && self.step_std > 0.0) {
            return Err(AppError::new(4, "Step standard deviation must be finite and > 0."));
        }
        Ok(())
    }
}

/// Configuration for scoring one expression-tree curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    /// Reference file; `None` uses the built-in helix.
    pub reference: Option<PathBuf>,
    /// Prefix expressions for the x, y and z coordinates.
    pub axes: [String; 3],
    pub export_points: Option<PathBuf>,
}

/// Portable record of a finished annealing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub tool: String,
    pub finished_at: String,
    pub reference_points: usize,
    pub iterations: usize,
    pub cost_mode: CostMode,
    pub seed: Option<u64>,
    pub state: RaupState,
    pub rmse: f64,
    pub initial_rmse: f64,
    pub accepted_moves: usize,
    pub elapsed_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_requires_two_finite_points() {
        assert_eq!(
            ReferenceCurve::new(vec![Point3::zeros()]).unwrap_err().exit_code(),
            2
        );
        let bad = vec![Point3::zeros(), Point3::new(f64::NAN, 0.0, 0.0)];
        assert!(ReferenceCurve::new(bad).is_err());
        assert!(ReferenceCurve::new(vec![Point3::zeros(), Point3::x()]).is_ok());
    }

    #[test]
    fn default_helix_matches_sampling() {
        let helix = ReferenceCurve::helix(1000, 0.1).unwrap();
        assert_eq!(helix.len(), 1000);
        assert_eq!(helix.first(), Point3::new(1.0, 0.0, 0.0));
        let p = helix.points()[10];
        assert!((p - Point3::new(1.0_f64.cos(), 1.0_f64.sin(), 1.0)).norm() < 1e-12);
    }

    #[test]
    fn default_config_is_valid_and_bad_ranges_are_rejected() {
        let config = AnnealConfig::default();
        assert!(config.validate().is_ok());

        let swapped = AnnealConfig {
            min_temperature: 10.0,
            max_temperature: 1.0,
            ..AnnealConfig::default()
        };
        assert_eq!(swapped.validate().unwrap_err().exit_code(), 4);

        let frozen = AnnealConfig {
            iterations: 0,
            ..AnnealConfig::default()
        };
        assert!(frozen.validate().is_err());
    }
}
