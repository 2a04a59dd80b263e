//! Command-line parsing for the shell-curve fitter.
//!
//! Argument parsing and command dispatch stay separate from the modeling/math
//! code; `app` maps these structs into plain config values.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::CostMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "snailfit", version, about = "Fit 3-D curves to shell growth references")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search Raup model parameters by simulated annealing and print the result CSV.
    Anneal(AnnealArgs),
    /// Score a parametric curve given as prefix expressions against a reference.
    Score(ScoreArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AnnealArgs {
    /// Reference file of whitespace-separated x y z triples (default: built-in helix).
    pub reference: Option<PathBuf>,

    /// Iteration budget.
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub iterations: usize,

    /// Random seed (default: OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Standard deviation of the Gaussian proposal step.
    #[arg(long, default_value_t = 0.01)]
    pub step_std: f64,

    /// Starting temperature.
    #[arg(long, default_value_t = 1000.0)]
    pub max_temp: f64,

    /// Final temperature.
    #[arg(long, default_value_t = 0.00001)]
    pub min_temp: f64,

    /// How a candidate state is compared with the reference.
    #[arg(long, value_enum, default_value_t = CostMode::Sampled)]
    pub cost: CostMode,

    /// Log progress every N iterations at debug level (0 disables).
    #[arg(long, default_value_t = 10_000)]
    pub log_every: usize,

    /// Export the run record to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Export the final model's points to CSV.
    #[arg(long = "export-points")]
    pub export_points: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// Reference file of whitespace-separated x y z triples (default: built-in helix).
    pub reference: Option<PathBuf>,

    /// x(t) as a prefix expression, e.g. "(cos t)".
    #[arg(long)]
    pub x: String,

    /// y(t) as a prefix expression.
    #[arg(long)]
    pub y: String,

    /// z(t) as a prefix expression.
    #[arg(long)]
    pub z: String,

    /// Export the aligned model points to CSV.
    #[arg(long = "export-points")]
    pub export_points: Option<PathBuf>,
}
