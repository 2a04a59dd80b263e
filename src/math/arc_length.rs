//! Arc-length stepping along a parametric curve.
//!
//! Given a point already reached at `t_prev`, we want the next parameter `t`
//! whose position lies `d` away from it (straight-line distance, matching how
//! reference samples are spaced).
//!
//! - Seed with a linear step: `t0 = t_prev + d / |v(t_prev)|`. Where the speed
//!   at `t_prev` is zero or non-finite (or the quotient overflows), the seed is
//!   the fixed forward step `t_prev + FALLBACK_STEP` instead.
//! - Refine with Newton on `f(t) = |p(t) - p(t_prev)| - d`, using the curve
//!   speed `|v(t)|` as the slope.
//! - Accept a refined iterate once `|f| <= 0.001 · d`.
//!
//! The refinement is bounded effort: a non-finite speed, a step that does not
//! move past `t_prev`, or more than `MAX_NEWTON_ITERATIONS` steps abandon it and
//! the linear seed is returned instead.

use tracing::trace;

use crate::models::CurveModel;

pub const MAX_NEWTON_ITERATIONS: usize = 10;

/// Convergence threshold as a fraction of the target distance.
pub const RELATIVE_TOLERANCE: f64 = 0.001;

/// Parameter step used when the speed at `t_prev` gives no usable linear step.
pub const FALLBACK_STEP: f64 = 0.01;

/// Find the parameter one `target_distance` further along `model` than `t_prev`.
pub fn next_t<M: CurveModel + ?Sized>(model: &M, t_prev: f64, target_distance: f64) -> f64 {
    let origin = model.position(t_prev);
    let seed = linear_seed(model.velocity(t_prev).norm(), t_prev, target_distance);
    let tolerance = RELATIVE_TOLERANCE * target_distance;

    let mut t = seed;
    for iteration in 0..MAX_NEWTON_ITERATIONS {
        let speed = model.velocity(t).norm();
        if !speed.is_finite() {
            trace!(t_prev, t, iteration, "non-finite speed, using linear step");
            return seed;
        }

        let residual = (model.position(t) - origin).norm() - target_distance;
        let refined = t - residual / speed;
        // Also rejects NaN.
        if !(refined.is_finite() && refined > t_prev) {
            trace!(t_prev, refined, iteration, "refinement left the forward range, using linear step");
            return seed;
        }

        let refined_residual = (model.position(refined) - origin).norm() - target_distance;
        if refined_residual.abs() <= tolerance {
            return refined;
        }
        t = refined;
    }

    trace!(t_prev, target_distance, "no convergence, using linear step");
    seed
}

fn linear_seed(speed: f64, t_prev: f64, target_distance: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 {
        let seed = t_prev + target_distance / speed;
        if seed.is_finite() {
            return seed;
        }
    }
    trace!(t_prev, speed, "flat or singular start, using fixed forward step");
    t_prev + FALLBACK_STEP
}
