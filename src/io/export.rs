//! Result exports.
//!
//! - the one-row result CSV printed after an annealing run
//! - generated model points as CSV, for plotting against the reference
//! - the full run record as JSON

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Point3, RunRecord};
use crate::error::AppError;

pub const RESULT_HEADER: &str = "time,w,r0,rc,y0,t,rmse";

/// Header plus one row: elapsed milliseconds, then the state and cost at six decimals.
pub fn format_result_csv(record: &RunRecord) -> String {
    let s = &record.state;
    format!(
        "{RESULT_HEADER}\n{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}\n",
        record.elapsed_ms, s.w, s.r0, s.rc, s.y0, s.t, record.rmse
    )
}

/// Write generated points to a CSV file (`x,y,z`).
pub fn write_points_csv(path: &Path, points: &[Point3]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create points CSV '{}': {e}", path.display())))?;

    writeln!(file, "x,y,z").map_err(|e| AppError::new(2, format!("Failed to write points CSV header: {e}")))?;
    for p in points {
        writeln!(file, "{:.6},{:.6},{:.6}", p.x, p.y, p.z)
            .map_err(|e| AppError::new(2, format!("Failed to write points CSV row: {e}")))?;
    }
    Ok(())
}

/// Write the run record as pretty JSON.
pub fn write_run_json(path: &Path, record: &RunRecord) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create run JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, record).map_err(|e| AppError::new(2, format!("Failed to write run JSON: {e}")))?;
    Ok(())
}
