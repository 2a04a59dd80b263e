//! Raup's helico-spiral shell growth model.
//!
//! With growth factor `g(θ) = w^(θ / 2π)`:
//!
//! - `r(θ) = r0 · g(θ)`
//! - `y(θ) = y0 · g(θ) + rc · t · (g(θ) - 1)`
//!
//! The model is used two ways:
//! - sampled: reference rows are `(θ, r, z)` and the model point for a row is
//!   `(θ, r(θ), y(θ))`
//! - as a Cartesian curve `(r sin θ, r cos θ, y)` through [`CurveModel`], so it
//!   can be scored like any other parametric model

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{Point3, ReferenceCurve};
use crate::models::CurveModel;

/// One point in the five-dimensional Raup parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaupState {
    /// Whorl expansion rate.
    pub w: f64,
    /// Initial radius.
    pub r0: f64,
    /// Initial translation rate.
    pub y0: f64,
    /// Translation rate of the rate.
    pub rc: f64,
    /// Shape/shift parameter.
    pub t: f64,
}

/// Selects which field a proposal perturbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaupField {
    W,
    R0,
    Y0,
    Rc,
    T,
}

impl RaupField {
    pub const ALL: [RaupField; 5] = [
        RaupField::W,
        RaupField::R0,
        RaupField::Y0,
        RaupField::Rc,
        RaupField::T,
    ];
}

impl RaupState {
    /// Arguments follow the field declaration order `w, r0, y0, rc, t`, which
    /// differs from the result CSV's column order `w,r0,rc,y0,t`.
    pub fn new(w: f64, r0: f64, y0: f64, rc: f64, t: f64) -> Self {
        Self { w, r0, y0, rc, t }
    }

    /// Draw an initial state: `r0, y0, rc` in `[0, 1)`, `w` in `[0, 30)`, `t` in `[0, 5)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r0: f64 = rng.r#gen();
        let y0: f64 = rng.r#gen();
        let rc: f64 = rng.r#gen();
        let w = rng.r#gen::<f64>() * 30.0;
        let t = rng.r#gen::<f64>() * 5.0;
        Self { w, r0, y0, rc, t }
    }

    /// Copy of `self` with `shift` added to one field.
    pub fn perturbed(&self, field: RaupField, shift: f64) -> Self {
        let mut next = *self;
        match field {
            RaupField::W => next.w += shift,
            RaupField::R0 => next.r0 += shift,
            RaupField::Y0 => next.y0 += shift,
            RaupField::Rc => next.rc += shift,
            RaupField::T => next.t += shift,
        }
        next
    }

    pub fn growth(&self, theta: f64) -> f64 {
        self.w.powf(theta / TAU)
    }

    pub fn radius(&self, theta: f64) -> f64 {
        self.r0 * self.growth(theta)
    }

    pub fn height(&self, theta: f64) -> f64 {
        let g = self.growth(theta);
        self.y0 * g + self.rc * self.t * (g - 1.0)
    }

    /// Model point in the reference's `(θ, r, z)` coordinates.
    pub fn sample_point(&self, theta: f64) -> Point3 {
        Point3::new(theta, self.radius(theta), self.height(theta))
    }

    /// One model point per reference row, taking `θ` from the row's first coordinate.
    pub fn sampled_points(&self, reference: &ReferenceCurve) -> Vec<Point3> {
        reference
            .points()
            .iter()
            .map(|p| self.sample_point(p.x))
            .collect()
    }
}

impl std::fmt::Display for RaupState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{w: {}, r0: {}, rc: {}, y0: {}, t: {}}}",
            self.w, self.r0, self.rc, self.y0, self.t
        )
    }
}

impl CurveModel for RaupState {
    fn position(&self, theta: f64) -> Point3 {
        let r = self.radius(theta);
        let (sin, cos) = theta.sin_cos();
        Point3::new(r * sin, r * cos, self.height(theta))
    }

    fn velocity(&self, theta: f64) -> Point3 {
        // g' = g · ln(w) / 2π
        let g = self.growth(theta);
        let dg = g * self.w.ln() / TAU;
        let r = self.r0 * g;
        let dr = self.r0 * dg;
        let (sin, cos) = theta.sin_cos();
        Point3::new(
            dr * sin + r * cos,
            dr * cos - r * sin,
            (self.y0 + self.rc * self.t) * dg,
        )
    }
}
