//! Parametric curve models.
//!
//! Scoring code only needs two primitive operations from a model:
//! - its position at parameter `t`
//! - its velocity (first derivative) at `t`, used by the arc-length solver
//!
//! `TreeCurve` provides both from three expression trees, one per axis, and
//! their symbolic derivatives.

use crate::domain::Point3;
use crate::error::AppError;
use crate::tree::{EvalContext, ExprTree};

/// A 3-D curve parametrised by a single real `t`.
pub trait CurveModel {
    fn position(&self, t: f64) -> Point3;
    fn velocity(&self, t: f64) -> Point3;
}

/// A curve whose x, y and z coordinates are expression trees of `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeCurve {
    axes: [ExprTree; 3],
    derivatives: [ExprTree; 3],
}

impl TreeCurve {
    /// Build a curve from `[x, y, z]` trees.
    ///
    /// Fails with exit code 3 if any tree has no derivative.
    pub fn new(axes: [ExprTree; 3]) -> Result<Self, AppError> {
        for tree in &axes {
            tree.ensure_differentiable()?;
        }
        let derivatives = [
            axes[0].differentiate()?,
            axes[1].differentiate()?,
            axes[2].differentiate()?,
        ];
        Ok(Self { axes, derivatives })
    }

    pub fn axes(&self) -> &[ExprTree; 3] {
        &self.axes
    }

    pub fn derivatives(&self) -> &[ExprTree; 3] {
        &self.derivatives
    }
}

impl CurveModel for TreeCurve {
    fn position(&self, t: f64) -> Point3 {
        evaluate_axes(&self.axes, t)
    }

    fn velocity(&self, t: f64) -> Point3 {
        evaluate_axes(&self.derivatives, t)
    }
}

fn evaluate_axes(trees: &[ExprTree; 3], t: f64) -> Point3 {
    let contexts = EvalContext::axes(t);
    Point3::new(
        trees[0].evaluate(&contexts[0]),
        trees[1].evaluate(&contexts[1]),
        trees[2].evaluate(&contexts[2]),
    )
}
