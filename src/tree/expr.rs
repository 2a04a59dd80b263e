//! Expression tree nodes and their evaluation.
//!
//! Trees are plain owned values: every interior node owns its children through a
//! `Box`, so there is no sharing and no cycles. `Clone` is the structural deep
//! copy used wherever one subtree has to appear twice (product/quotient rules).
//!
//! Evaluation never reads global state. The current value of `t` travels in an
//! [`EvalContext`] passed by reference, which keeps a tree safe to evaluate from
//! many threads at once.
//!
//! Numeric policies:
//! - division by an exact `0.0` yields `0.0`
//! - `ln(x)` for `x < LN_FLOOR` yields `0.0`
//! - everything else follows IEEE-754, so `pow`/`tan` may produce NaN or ±inf

use std::ops::Range;

use rand::Rng;

/// Arguments below this value make `ln` evaluate to zero.
pub const LN_FLOOR: f64 = 0.00005;

/// Input for a single evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvalContext {
    t: f64,
}

impl EvalContext {
    pub fn new(t: f64) -> Self {
        Self { t }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    /// One independent context per spatial axis (x, y, z).
    pub fn axes(t: f64) -> [EvalContext; 3] {
        [Self::new(t), Self::new(t), Self::new(t)]
    }
}

/// A scalar-valued arithmetic expression of `t`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprTree {
    Constant(f64),
    /// The free parameter `t`.
    Parameter,
    /// A constant drawn at random when the tree was built and frozen since.
    RandomConstant(f64),
    Add(Box<ExprTree>, Box<ExprTree>),
    Sub(Box<ExprTree>, Box<ExprTree>),
    Mul(Box<ExprTree>, Box<ExprTree>),
    Div(Box<ExprTree>, Box<ExprTree>),
    Pow(Box<ExprTree>, Box<ExprTree>),
    Sin(Box<ExprTree>),
    Cos(Box<ExprTree>),
    Tan(Box<ExprTree>),
    Exp(Box<ExprTree>),
    Ln(Box<ExprTree>),
}

impl ExprTree {
    pub fn add(lhs: ExprTree, rhs: ExprTree) -> Self {
        ExprTree::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: ExprTree, rhs: ExprTree) -> Self {
        ExprTree::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn mul(lhs: ExprTree, rhs: ExprTree) -> Self {
        ExprTree::Mul(Box::new(lhs), Box::new(rhs))
    }

    pub fn div(lhs: ExprTree, rhs: ExprTree) -> Self {
        ExprTree::Div(Box::new(lhs), Box::new(rhs))
    }

    pub fn pow(base: ExprTree, exponent: ExprTree) -> Self {
        ExprTree::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn sin(arg: ExprTree) -> Self {
        ExprTree::Sin(Box::new(arg))
    }

    pub fn cos(arg: ExprTree) -> Self {
        ExprTree::Cos(Box::new(arg))
    }

    pub fn tan(arg: ExprTree) -> Self {
        ExprTree::Tan(Box::new(arg))
    }

    pub fn exp(arg: ExprTree) -> Self {
        ExprTree::Exp(Box::new(arg))
    }

    pub fn ln(arg: ExprTree) -> Self {
        ExprTree::Ln(Box::new(arg))
    }

    /// Draw a frozen random leaf uniformly from `range`.
    pub fn random_constant<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>) -> Self {
        ExprTree::RandomConstant(rng.gen_range(range))
    }

    /// Evaluate the tree at `ctx.t()`.
    pub fn evaluate(&self, ctx: &EvalContext) -> f64 {
        match self {
            ExprTree::Constant(v) | ExprTree::RandomConstant(v) => *v,
            ExprTree::Parameter => ctx.t(),
            ExprTree::Add(a, b) => a.evaluate(ctx) + b.evaluate(ctx),
            ExprTree::Sub(a, b) => a.evaluate(ctx) - b.evaluate(ctx),
            ExprTree::Mul(a, b) => a.evaluate(ctx) * b.evaluate(ctx),
            ExprTree::Div(a, b) => {
                let divisor = b.evaluate(ctx);
                if divisor == 0.0 {
                    0.0
                } else {
                    a.evaluate(ctx) / divisor
                }
            }
            ExprTree::Pow(a, b) => a.evaluate(ctx).powf(b.evaluate(ctx)),
            ExprTree::Sin(a) => a.evaluate(ctx).sin(),
            ExprTree::Cos(a) => a.evaluate(ctx).cos(),
            ExprTree::Tan(a) => a.evaluate(ctx).tan(),
            ExprTree::Exp(a) => a.evaluate(ctx).exp(),
            ExprTree::Ln(a) => {
                let x = a.evaluate(ctx);
                if x < LN_FLOOR { 0.0 } else { x.ln() }
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            ExprTree::Constant(_) | ExprTree::Parameter | ExprTree::RandomConstant(_) => 1,
            ExprTree::Sin(a) | ExprTree::Cos(a) | ExprTree::Tan(a) | ExprTree::Exp(a) | ExprTree::Ln(a) => {
                1 + a.size()
            }
            ExprTree::Add(a, b)
            | ExprTree::Sub(a, b)
            | ExprTree::Mul(a, b)
            | ExprTree::Div(a, b)
            | ExprTree::Pow(a, b) => 1 + a.size() + b.size(),
        }
    }

    /// Longest root-to-leaf path, counting nodes (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            ExprTree::Constant(_) | ExprTree::Parameter | ExprTree::RandomConstant(_) => 1,
            ExprTree::Sin(a) | ExprTree::Cos(a) | ExprTree::Tan(a) | ExprTree::Exp(a) | ExprTree::Ln(a) => {
                1 + a.depth()
            }
            ExprTree::Add(a, b)
            | ExprTree::Sub(a, b)
            | ExprTree::Mul(a, b)
            | ExprTree::Div(a, b)
            | ExprTree::Pow(a, b) => 1 + a.depth().max(b.depth()),
        }
    }

    /// Whether any leaf of the tree is `t`.
    pub fn depends_on_parameter(&self) -> bool {
        match self {
            ExprTree::Parameter => true,
            ExprTree::Constant(_) | ExprTree::RandomConstant(_) => false,
            ExprTree::Sin(a) | ExprTree::Cos(a) | ExprTree::Tan(a) | ExprTree::Exp(a) | ExprTree::Ln(a) => {
                a.depends_on_parameter()
            }
            ExprTree::Add(a, b)
            | ExprTree::Sub(a, b)
            | ExprTree::Mul(a, b)
            | ExprTree::Div(a, b)
            | ExprTree::Pow(a, b) => a.depends_on_parameter() || b.depends_on_parameter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn t() -> ExprTree {
        ExprTree::Parameter
    }

    fn c(v: f64) -> ExprTree {
        ExprTree::Constant(v)
    }

    #[test]
    fn evaluates_basic_arithmetic() {
        // (t + 2) * (t - 1) at t = 3 -> 5 * 2
        let tree = ExprTree::mul(ExprTree::add(t(), c(2.0)), ExprTree::sub(t(), c(1.0)));
        assert_eq!(tree.evaluate(&EvalContext::new(3.0)), 10.0);

        let pow = ExprTree::pow(t(), c(3.0));
        assert_eq!(pow.evaluate(&EvalContext::new(2.0)), 8.0);
    }

    #[test]
    fn division_by_exact_zero_is_zero() {
        for &num in &[-3.0, 0.0, 1.5, 1e300] {
            let tree = ExprTree::div(c(num), ExprTree::sub(t(), t()));
            for &x in &[-2.0, 0.0, 0.7, 42.0] {
                assert_eq!(tree.evaluate(&EvalContext::new(x)), 0.0);
            }
        }
        // Non-zero divisors divide normally.
        let tree = ExprTree::div(c(1.0), t());
        assert_eq!(tree.evaluate(&EvalContext::new(4.0)), 0.25);
    }

    #[test]
    fn ln_below_floor_is_zero() {
        let tree = ExprTree::ln(t());
        for &x in &[-10.0, -1e-9, 0.0, 1e-6, 0.0000499] {
            assert_eq!(tree.evaluate(&EvalContext::new(x)), 0.0, "ln({x})");
        }
        let at_e = tree.evaluate(&EvalContext::new(std::f64::consts::E));
        assert!((at_e - 1.0).abs() < 1e-12);
        let at_floor = tree.evaluate(&EvalContext::new(LN_FLOOR));
        assert!((at_floor - LN_FLOOR.ln()).abs() < 1e-12);
    }

    #[test]
    fn transcendental_nodes_match_std() {
        let x = 0.3;
        let ctx = EvalContext::new(x);
        assert_eq!(ExprTree::sin(t()).evaluate(&ctx), x.sin());
        assert_eq!(ExprTree::cos(t()).evaluate(&ctx), x.cos());
        assert_eq!(ExprTree::tan(t()).evaluate(&ctx), x.tan());
        assert_eq!(ExprTree::exp(t()).evaluate(&ctx), x.exp());
    }

    #[test]
    fn pow_propagates_nan_for_negative_base() {
        let tree = ExprTree::pow(c(-2.0), c(0.5));
        assert!(tree.evaluate(&EvalContext::default()).is_nan());
    }

    #[test]
    fn random_constant_stays_frozen() {
        let mut rng = StdRng::seed_from_u64(7);
        let leaf = ExprTree::random_constant(&mut rng, 1.0..5.0);
        let ExprTree::RandomConstant(v) = leaf else {
            panic!("expected a random constant leaf");
        };
        assert!((1.0..5.0).contains(&v));
        assert_eq!(leaf.evaluate(&EvalContext::new(0.0)), v);
        assert_eq!(leaf.evaluate(&EvalContext::new(99.0)), v);
    }

    #[test]
    fn size_depth_and_parameter_dependence() {
        let tree = ExprTree::add(ExprTree::sin(t()), c(1.0));
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.depth(), 3);
        assert!(tree.depends_on_parameter());
        assert!(!ExprTree::mul(c(2.0), ExprTree::RandomConstant(3.0)).depends_on_parameter());
    }

    #[test]
    fn shared_tree_evaluates_concurrently() {
        let tree = ExprTree::mul(t(), t());
        let results: Vec<f64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let tree = &tree;
                    s.spawn(move || tree.evaluate(&EvalContext::new(i as f64)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, vec![0.0, 1.0, 4.0, 9.0]);
    }
}
