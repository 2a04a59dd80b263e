//! Shared run logic behind the `anneal` and `score` commands.
//!
//! load reference -> build model / search -> score -> generated points
//!
//! The command handlers in `app` only deal with presentation and exports.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::domain::{AnnealConfig, CostMode, Point3, ReferenceCurve, RunRecord, ScoreConfig};
use crate::error::AppError;
use crate::fit::{SimulatedAnnealing, generate_points, score};
use crate::io::read_reference;
use crate::models::TreeCurve;
use crate::tree::parse_tree;

/// Built-in reference: the unit helix sampled at `t = 0, 0.1, …, 99.9`.
pub const DEFAULT_HELIX_POINTS: usize = 1000;
pub const DEFAULT_HELIX_STEP: f64 = 0.1;

/// Outputs of one `snailfit anneal` run.
#[derive(Debug, Clone)]
pub struct AnnealRun {
    pub record: RunRecord,
    /// Final model points, in the coordinates the cost was measured in.
    pub points: Vec<Point3>,
}

/// Outputs of one `snailfit score` run.
#[derive(Debug, Clone)]
pub struct ScoreRun {
    pub reference_points: usize,
    pub rmse: f64,
    pub points: Vec<Point3>,
}

pub fn load_reference(path: Option<&Path>) -> Result<ReferenceCurve, AppError> {
    match path {
        Some(path) => read_reference(path),
        None => ReferenceCurve::helix(DEFAULT_HELIX_POINTS, DEFAULT_HELIX_STEP),
    }
}

pub fn run_anneal(config: &AnnealConfig) -> Result<AnnealRun, AppError> {
    let reference = load_reference(config.reference.as_deref())?;
    let mut annealer = SimulatedAnnealing::new(&reference, config)?;
    info!(
        points = reference.len(),
        iterations = config.iterations,
        cost = ?config.cost,
        seed = ?config.seed,
        "annealing started"
    );

    let started = Instant::now();
    let outcome = annealer.minimise();
    let elapsed_ms = started.elapsed().as_millis();

    let points = match config.cost {
        CostMode::Sampled => outcome.state.sampled_points(&reference),
        CostMode::ArcLength => generate_points(&outcome.state, &reference),
    };

    let record = RunRecord {
        tool: "snailfit".to_string(),
        finished_at: chrono::Local::now().to_rfc3339(),
        reference_points: reference.len(),
        iterations: outcome.iterations,
        cost_mode: config.cost,
        seed: config.seed,
        state: outcome.state,
        rmse: outcome.cost,
        initial_rmse: outcome.initial_cost,
        accepted_moves: outcome.accepted,
        elapsed_ms,
    };
    info!(
        rmse = record.rmse,
        accepted = record.accepted_moves,
        elapsed_ms = record.elapsed_ms as u64,
        "annealing finished"
    );

    Ok(AnnealRun { record, points })
}

pub fn run_score(config: &ScoreConfig) -> Result<ScoreRun, AppError> {
    let reference = load_reference(config.reference.as_deref())?;
    let [x, y, z] = &config.axes;
    let curve = TreeCurve::new([parse_tree(x)?, parse_tree(y)?, parse_tree(z)?])?;

    let rmse = score(&curve, &reference);
    info!(points = reference.len(), rmse, "scored curve");

    Ok(ScoreRun {
        reference_points: reference.len(),
        rmse,
        points: generate_points(&curve, &reference),
    })
}
