//! Reference curve ingest.
//!
//! The file is a flat list of reals separated by any whitespace (spaces, tabs,
//! newlines); values are consumed as `(x, y, z)` triples in file order. Line
//! breaks carry no meaning.

use std::fs;
use std::path::Path;

use crate::domain::{Point3, ReferenceCurve};
use crate::error::AppError;

/// Read and validate a reference curve file.
pub fn read_reference(path: &Path) -> Result<ReferenceCurve, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read reference '{}': {e}", path.display())))?;
    parse_reference(&text).map_err(|e| AppError::new(2, format!("{}: {}", path.display(), e.message())))
}

pub fn parse_reference(text: &str) -> Result<ReferenceCurve, AppError> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .map_err(|_| AppError::new(2, format!("Value {} ('{token}') is not a number.", i + 1)))
        })
        .collect::<Result<Vec<f64>, AppError>>()?;

    if values.len() % 3 != 0 {
        return Err(AppError::new(
            2,
            format!("Expected x y z triples, got {} values.", values.len()),
        ));
    }

    let points = values
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    ReferenceCurve::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples_ignore_line_layout() {
        let curve = parse_reference("1 0 0\n0.5\t1\n2 -3 4e-1 7\n").unwrap();
        assert_eq!(
            curve.points(),
            &[
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 2.0),
                Point3::new(-3.0, 0.4, 7.0),
            ]
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        for text in ["1 2 3 4 5 x", "1 2 3 4 5", "1 2 3", "", "1 2 3 nan 0 0"] {
            let err = parse_reference(text).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{text:?}");
        }
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_reference(Path::new("/nonexistent/reference.txt")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("/nonexistent/reference.txt"));
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("snailfit-reference-{}.txt", std::process::id()));
        fs::write(&path, "0 0 0\n1 1 1\n").unwrap();
        let curve = read_reference(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(curve.len(), 2);
    }
}
