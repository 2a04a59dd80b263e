//! Symbolic differentiation with respect to `t`.
//!
//! The result is always a freshly built tree; the input is only read. Subtrees
//! that appear more than once in a rule (product, quotient, chain) are cloned,
//! so the output never aliases the input.
//!
//! Derivative constants are emitted as frozen `RandomConstant` leaves (`1`, `0`,
//! `-1`), matching how the search engine represents baked-in numbers.
//!
//! Two node kinds only have a derivative when their `t`-dependence is limited:
//! - `pow` needs an exponent free of `t`; the general rule needs `ln(base)`
//! - `ln` needs an argument free of `t`; below `LN_FLOOR` it evaluates to a
//!   flat `0`, which `g' / g` would not reproduce
//!
//! Such trees are rejected up front.

use crate::error::AppError;
use crate::tree::ExprTree;

fn one() -> ExprTree {
    ExprTree::RandomConstant(1.0)
}

fn zero() -> ExprTree {
    ExprTree::RandomConstant(0.0)
}

impl ExprTree {
    /// Build the tree of `d(self)/dt`.
    pub fn differentiate(&self) -> Result<ExprTree, AppError> {
        let derivative = match self {
            ExprTree::Parameter => one(),
            ExprTree::Constant(_) | ExprTree::RandomConstant(_) => zero(),
            ExprTree::Add(f, g) => ExprTree::add(f.differentiate()?, g.differentiate()?),
            ExprTree::Sub(f, g) => ExprTree::sub(f.differentiate()?, g.differentiate()?),
            ExprTree::Mul(f, g) => {
                let df = f.differentiate()?;
                let dg = g.differentiate()?;
                ExprTree::add(
                    ExprTree::mul(f.as_ref().clone(), dg),
                    ExprTree::mul(df, g.as_ref().clone()),
                )
            }
            ExprTree::Div(f, g) => {
                let df = f.differentiate()?;
                let dg = g.differentiate()?;
                let numerator = ExprTree::sub(
                    ExprTree::mul(df, g.as_ref().clone()),
                    ExprTree::mul(f.as_ref().clone(), dg),
                );
                let denominator = ExprTree::mul(g.as_ref().clone(), g.as_ref().clone());
                ExprTree::div(numerator, denominator)
            }
            ExprTree::Pow(f, g) => {
                if g.depends_on_parameter() {
                    return Err(not_differentiable(self, "the exponent of a power must not depend on t"));
                }
                // d(f^c) = c * f^(c - 1) * f'
                let df = f.differentiate()?;
                let lowered = ExprTree::pow(f.as_ref().clone(), ExprTree::sub(g.as_ref().clone(), one()));
                ExprTree::mul(ExprTree::mul(g.as_ref().clone(), lowered), df)
            }
            ExprTree::Sin(g) => ExprTree::mul(ExprTree::cos(g.as_ref().clone()), g.differentiate()?),
            ExprTree::Cos(g) => ExprTree::mul(
                ExprTree::mul(ExprTree::RandomConstant(-1.0), ExprTree::sin(g.as_ref().clone())),
                g.differentiate()?,
            ),
            ExprTree::Tan(g) => ExprTree::div(
                g.differentiate()?,
                ExprTree::mul(ExprTree::cos(g.as_ref().clone()), ExprTree::cos(g.as_ref().clone())),
            ),
            ExprTree::Exp(g) => ExprTree::mul(ExprTree::exp(g.as_ref().clone()), g.differentiate()?),
            ExprTree::Ln(g) => {
                if g.depends_on_parameter() {
                    return Err(not_differentiable(self, LN_REASON));
                }
                zero()
            }
        };
        Ok(derivative)
    }

    /// Check that [`ExprTree::differentiate`] will succeed, without building anything.
    pub fn ensure_differentiable(&self) -> Result<(), AppError> {
        match self {
            ExprTree::Constant(_) | ExprTree::Parameter | ExprTree::RandomConstant(_) => Ok(()),
            ExprTree::Sin(a) | ExprTree::Cos(a) | ExprTree::Tan(a) | ExprTree::Exp(a) => a.ensure_differentiable(),
            ExprTree::Ln(a) => {
                if a.depends_on_parameter() {
                    return Err(not_differentiable(self, LN_REASON));
                }
                Ok(())
            }
            ExprTree::Pow(a, b) => {
                if b.depends_on_parameter() {
                    return Err(not_differentiable(self, "the exponent of a power must not depend on t"));
                }
                a.ensure_differentiable()
            }
            ExprTree::Add(a, b) | ExprTree::Sub(a, b) | ExprTree::Mul(a, b) | ExprTree::Div(a, b) => {
                a.ensure_differentiable()?;
                b.ensure_differentiable()
            }
        }
    }
}

const LN_REASON: &str = "ln is clamped below its floor, so its argument must not depend on t";

fn not_differentiable(node: &ExprTree, reason: &str) -> AppError {
    AppError::new(3, format!("Cannot differentiate `{node}`: {reason}."))
}
