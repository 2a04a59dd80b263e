//! Rotation aligning one direction with another.
//!
//! The rotation axis is `source × target` and the angle is the angle between
//! the two vectors. That axis is undefined when the vectors are (anti-)parallel
//! or one of them has zero length, so those cases are handled explicitly:
//!
//! - zero-length input or parallel vectors: identity
//! - anti-parallel vectors: half turn about an axis perpendicular to `source`

use std::f64::consts::PI;

use nalgebra::{Rotation3, Unit};

use crate::domain::Point3;

/// Vectors shorter than this are treated as having no direction.
const MIN_NORM: f64 = 1e-300;

/// `|a × b| / (|a| |b|)` at or below this counts as (anti-)parallel.
const PARALLEL_SIN: f64 = 1e-12;

/// Rotation that carries the direction of `source` onto the direction of `target`.
pub fn rotation_between(source: &Point3, target: &Point3) -> Rotation3<f64> {
    let source_norm = source.norm();
    let target_norm = target.norm();
    if !(source_norm > MIN_NORM && target_norm > MIN_NORM && source_norm.is_finite() && target_norm.is_finite()) {
        return Rotation3::identity();
    }

    let axis = source.cross(target);
    if axis.norm() <= PARALLEL_SIN * source_norm * target_norm {
        return if source.dot(target) > 0.0 {
            Rotation3::identity()
        } else {
            Rotation3::from_axis_angle(&perpendicular_axis(source), PI)
        };
    }

    Rotation3::from_axis_angle(&Unit::new_normalize(axis), source.angle(target))
}

/// Unit vector perpendicular to `v`, built against the basis axis `v` leans on least.
fn perpendicular_axis(v: &Point3) -> Unit<Point3> {
    let (x, y, z) = (v.x.abs(), v.y.abs(), v.z.abs());
    let helper = if x <= y && x <= z {
        Point3::x()
    } else if y <= z {
        Point3::y()
    } else {
        Point3::z()
    };
    Unit::new_normalize(v.cross(&helper))
}
