//! Formatted terminal output.
//!
//! Formatting lives here so the fitting code stays free of presentation and
//! output changes are localized.

use crate::domain::{RunRecord, ScoreConfig};

/// Summary of a finished annealing run.
pub fn format_anneal_summary(record: &RunRecord) -> String {
    let mut out = String::new();

    out.push_str("=== snailfit - Raup shell annealing ===\n");
    out.push_str(&format!("Reference points: {}\n", record.reference_points));
    out.push_str(&format!("Cost: {:?}\n", record.cost_mode));
    out.push_str(&format!(
        "Seed: {}\n",
        record.seed.map(|s| s.to_string()).unwrap_or_else(|| "entropy".to_string())
    ));
    out.push_str(&format!(
        "Iterations: {} (accepted {}, {:.1}%)\n",
        record.iterations,
        record.accepted_moves,
        100.0 * record.accepted_moves as f64 / record.iterations.max(1) as f64
    ));
    out.push_str(&format!("Initial RMSE: {}\n", fmt_cost(record.initial_rmse)));
    out.push_str(&format!("Final RMSE: {}\n", fmt_cost(record.rmse)));
    out.push_str(&format!("State: {}\n", record.state));
    out.push_str(&format!("Elapsed: {} ms\n", record.elapsed_ms));

    out
}

/// Summary of scoring one expression-tree curve.
pub fn format_score_summary(config: &ScoreConfig, reference_points: usize, rmse: f64) -> String {
    let [x, y, z] = &config.axes;
    format!(
        "x(t) = {x}\ny(t) = {y}\nz(t) = {z}\nReference points: {reference_points}\nRMSE: {}\n",
        fmt_cost(rmse)
    )
}

fn fmt_cost(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.6}")
    } else {
        "inf (degenerate model)".to_string()
    }
}
