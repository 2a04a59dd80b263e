//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - loads `.env` and installs the log subscriber
//! - parses CLI arguments
//! - runs annealing or scoring through `pipeline`
//! - prints results and writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnnealArgs, Cli, Command, ScoreArgs};
use crate::domain::{AnnealConfig, ScoreConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `snailfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Anneal(args) => handle_anneal(args),
        Command::Score(args) => handle_score(args),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, embedding); keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

pub fn anneal_config_from_args(args: &AnnealArgs) -> AnnealConfig {
    AnnealConfig {
        iterations: args.iterations,
        max_temperature: args.max_temp,
        min_temperature: args.min_temp,
        step_std: args.step_std,
        seed: args.seed,
        cost: args.cost,
        log_every: args.log_every,
        reference: args.reference.clone(),
        export_json: args.export_json.clone(),
        export_points: args.export_points.clone(),
    }
}

pub fn score_config_from_args(args: &ScoreArgs) -> ScoreConfig {
    ScoreConfig {
        reference: args.reference.clone(),
        axes: [args.x.clone(), args.y.clone(), args.z.clone()],
        export_points: args.export_points.clone(),
    }
}

fn handle_anneal(args: AnnealArgs) -> Result<(), AppError> {
    let config = anneal_config_from_args(&args);
    let run = pipeline::run_anneal(&config)?;

    // Summary on stderr; stdout carries only the result CSV.
    eprintln!("{}", crate::report::format_anneal_summary(&run.record));
    print!("{}", crate::io::format_result_csv(&run.record));

    if let Some(path) = &config.export_json {
        crate::io::write_run_json(path, &run.record)?;
    }
    if let Some(path) = &config.export_points {
        crate::io::write_points_csv(path, &run.points)?;
    }

    Ok(())
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = score_config_from_args(&args);
    let run = pipeline::run_score(&config)?;

    print!(
        "{}",
        crate::report::format_score_summary(&config, run.reference_points, run.rmse)
    );

    if let Some(path) = &config.export_points {
        crate::io::write_points_csv(path, &run.points)?;
    }

    Ok(())
}
