//! RMSE between a reference curve and a parametric model.
//!
//! The model is walked along in steps matching the reference spacing and
//! rigidly aligned before comparison:
//!
//! 1. translate so `model(0)` lands on the first reference point
//! 2. step to the first sample and rotate so the model's first heading matches
//!    the reference's first heading (about the shared start point)
//! 3. for every further sample, step by the reference's own spacing, apply the
//!    same translation and rotation, and accumulate the squared distance
//!
//! Scores are deterministic for a given model and reference. Nothing here keeps
//! state between calls, so many models can be scored at once; see
//! [`score_population`].

use rayon::prelude::*;

use crate::domain::{Point3, ReferenceCurve};
use crate::math::{next_t, rotation_between};
use crate::models::CurveModel;

/// Score `model` against `reference` (lower is better).
///
/// Degenerate models (NaN/inf anywhere along the walk) score `f64::INFINITY`.
pub fn score<M: CurveModel + ?Sized>(model: &M, reference: &ReferenceCurve) -> f64 {
    let generated = generate_points(model, reference);
    rmse(&reference.points()[1..], &generated)
}

/// Aligned model points paired with `reference[1..]`.
pub fn generate_points<M: CurveModel + ?Sized>(model: &M, reference: &ReferenceCurve) -> Vec<Point3> {
    let samples = reference.points();
    let origin = samples[0];
    let translation = origin - model.position(0.0);

    let first_t = next_t(model, 0.0, (samples[1] - samples[0]).norm());
    let heading = model.position(first_t) + translation - origin;
    let rotation = rotation_between(&heading, &(samples[1] - origin));

    let mut t = 0.0;
    let mut out = Vec::with_capacity(samples.len() - 1);
    for pair in samples.windows(2) {
        t = next_t(model, t, (pair[1] - pair[0]).norm());
        let local = model.position(t) + translation - origin;
        out.push(origin + rotation * local);
    }
    out
}

/// Root-mean-square distance between paired points.
///
/// Only the first `generated.len()` reference points are used. Empty or
/// non-finite results map to `f64::INFINITY`.
pub fn rmse(reference: &[Point3], generated: &[Point3]) -> f64 {
    if generated.is_empty() {
        return f64::INFINITY;
    }
    let sum: f64 = reference
        .iter()
        .zip(generated)
        .map(|(r, g)| (r - g).norm_squared())
        .sum();
    let value = (sum / generated.len() as f64).sqrt();
    if value.is_finite() { value } else { f64::INFINITY }
}

/// Score many models against one reference in parallel.
///
/// Results keep the order of `models`.
pub fn score_population<M: CurveModel + Sync>(models: &[M], reference: &ReferenceCurve) -> Vec<f64> {
    models.par_iter().map(|model| score(model, reference)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RaupState, TreeCurve};
    use crate::tree::parse_tree;

    fn curve(x: &str, y: &str, z: &str) -> TreeCurve {
        TreeCurve::new([
            parse_tree(x).unwrap(),
            parse_tree(y).unwrap(),
            parse_tree(z).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn helix_scores_zero_against_itself() {
        let reference = ReferenceCurve::helix(10, 0.1).unwrap();
        let helix = curve("(cos t)", "(sin t)", "t");
        let error = score(&helix, &reference);
        assert!(error <= 1e-6, "rmse = {error}");
    }

    #[test]
    fn translation_is_removed() {
        let reference = ReferenceCurve::helix(20, 0.1).unwrap();
        let moved = curve("(+ 5 (cos t))", "(+ -2 (sin t))", "(+ t 3)");
        let error = score(&moved, &reference);
        assert!(error <= 1e-6, "rmse = {error}");
    }

    #[test]
    fn correct_handedness_beats_mirror_image() {
        let reference = ReferenceCurve::helix(1000, 0.1).unwrap();
        let right = curve("(cos t)", "(sin t)", "t");
        let mirrored = curve("(sin t)", "(cos t)", "t");
        let good = score(&right, &reference);
        let bad = score(&mirrored, &reference);
        assert!(good < bad, "good={good} bad={bad}");
    }

    #[test]
    fn generated_points_pair_with_reference_tail() {
        let reference = ReferenceCurve::helix(5, 0.2).unwrap();
        let points = generate_points(&curve("(cos t)", "(sin t)", "t"), &reference);
        assert_eq!(points.len(), reference.len() - 1);
        for (g, r) in points.iter().zip(&reference.points()[1..]) {
            assert!((g - r).norm() < 1e-4);
        }
    }

    #[test]
    fn curve_at_rest_at_start_scores_against_its_own_trace() {
        // x = t² has zero speed at t = 0.
        let points = (0..10)
            .map(|i| {
                let t = i as f64 * 0.1;
                Point3::new(t * t, 0.0, 0.0)
            })
            .collect();
        let reference = ReferenceCurve::new(points).unwrap();
        let error = score(&curve("(* t t)", "0", "0"), &reference);
        assert!(error < 1e-3, "rmse = {error}");
    }

    struct Broken;

    impl CurveModel for Broken {
        fn position(&self, t: f64) -> Point3 {
            Point3::new(t, f64::NAN, 0.0)
        }
        fn velocity(&self, _t: f64) -> Point3 {
            Point3::new(1.0, 0.0, 0.0)
        }
    }

    #[test]
    fn degenerate_model_scores_infinity() {
        let reference = ReferenceCurve::helix(5, 0.1).unwrap();
        assert_eq!(score(&Broken, &reference), f64::INFINITY);
    }

    #[test]
    fn rmse_averages_squared_distances() {
        let reference = [Point3::zeros(), Point3::zeros()];
        let generated = [Point3::new(3.0, 4.0, 0.0), Point3::zeros()];
        // sqrt((25 + 0) / 2)
        assert!((rmse(&reference, &generated) - 12.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(rmse(&reference, &[]), f64::INFINITY);
    }

    #[test]
    fn population_scores_keep_order_and_match_serial() {
        let reference = ReferenceCurve::helix(50, 0.1).unwrap();
        let models = vec![
            curve("(cos t)", "(sin t)", "t"),
            curve("t", "(* t t)", "0"),
            curve("(sin t)", "(cos t)", "t"),
        ];
        let parallel = score_population(&models, &reference);
        let serial: Vec<f64> = models.iter().map(|m| score(m, &reference)).collect();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn raup_curve_scores_against_its_own_trace() {
        let state = RaupState::new(1.5, 1.0, 0.2, 0.3, 0.8);
        let points: Vec<Point3> = (0..40).map(|i| state.position(i as f64 * 0.15)).collect();
        let reference = ReferenceCurve::new(points).unwrap();
        assert!(score(&state, &reference) < 1e-3);
    }
}
