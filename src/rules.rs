//! Elementary quadrature rules.
//!
//! Left-rectangle, midpoint, and trapezoidal rules over a uniform partition.
//! Every node is evaluated through [`IntegrableFunction::eval_checked`], so a
//! node that lands on a pole fails the whole call with
//! [`QuadError::SingularityEncountered`] instead of folding `NaN` or `inf`
//! into a plausible-looking sum.

use crate::error::{QuadError, QuadResult};
use crate::function::IntegrableFunction;

/// Quadrature rule selector, for callers that pick a rule as data
/// (e.g. a convergence sweep).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureRule {
    /// [`left_rectangle`]
    LeftRectangle,
    /// [`midpoint`]
    Midpoint,
    /// [`trapezoid`]
    Trapezoid,
}

impl QuadratureRule {
    /// Apply the selected rule.
    pub fn apply(self, f: &IntegrableFunction, a: f64, b: f64, n: usize) -> QuadResult<f64> {
        match self {
            Self::LeftRectangle => left_rectangle(f, a, b, n),
            Self::Midpoint => midpoint(f, a, b, n),
            Self::Trapezoid => trapezoid(f, a, b, n),
        }
    }

    /// The rule's name, as used in error contexts.
    pub fn name(self) -> &'static str {
        match self {
            Self::LeftRectangle => "left_rectangle",
            Self::Midpoint => "midpoint",
            Self::Trapezoid => "trapezoid",
        }
    }
}

/// Left-rectangle rule: `h * Σ f(a + i·h)` for `i = 0..n`.
///
/// Evaluates at `a` but never at `b`.
///
/// # Errors
///
/// [`QuadError::InvalidNodeCount`] for `n = 0`,
/// [`QuadError::InvalidInterval`] for `a >= b`,
/// [`QuadError::SingularityEncountered`] if any node sits on a pole.
///
/// # Example
///
/// ```
/// use quadpv::{rules, IntegrableFunction};
///
/// let f = IntegrableFunction::new(|x: f64| x * x);
/// let result = rules::left_rectangle(&f, 0.0, 1.0, 100).unwrap();
/// // Exact value is 1/3; the left rule is first order
/// assert!((result - 1.0 / 3.0).abs() < 0.01);
/// ```
pub fn left_rectangle(f: &IntegrableFunction, a: f64, b: f64, n: usize) -> QuadResult<f64> {
    check_inputs(a, b, n, "left_rectangle")?;

    let h = (b - a) / n as f64;
    let mut sum = 0.0;
    for i in 0..n {
        sum += f.eval_checked(a + i as f64 * h, "left_rectangle")?;
    }

    Ok(sum * h)
}

/// Midpoint rule: `h * Σ f(a + (i + 0.5)·h)` for `i = 0..n`.
///
/// Never evaluates the raw endpoints, which makes it the robust choice when
/// a pole sits on an interval boundary.
///
/// # Example
///
/// ```
/// use quadpv::{rules, IntegrableFunction};
///
/// let f = IntegrableFunction::new(|x: f64| x * x);
/// let result = rules::midpoint(&f, 0.0, 1.0, 100).unwrap();
/// assert!((result - 1.0 / 3.0).abs() < 1e-4);
/// ```
pub fn midpoint(f: &IntegrableFunction, a: f64, b: f64, n: usize) -> QuadResult<f64> {
    check_inputs(a, b, n, "midpoint")?;

    let h = (b - a) / n as f64;
    let mut sum = 0.0;
    for i in 0..n {
        sum += f.eval_checked(a + (i as f64 + 0.5) * h, "midpoint")?;
    }

    Ok(sum * h)
}

/// Trapezoidal rule: `h * (0.5·(f(a) + f(b)) + Σ f(a + i·h))` for interior
/// nodes.
///
/// Evaluates both endpoints, so it fails with
/// [`QuadError::SingularityEncountered`] whenever a pole sits exactly on a
/// boundary.
///
/// # Example
///
/// ```
/// use quadpv::{rules, IntegrableFunction};
///
/// // 1/((x+1)(x+3)) has a pole at the left endpoint of [-1, 0]
/// let f = IntegrableFunction::new(|x: f64| 1.0 / (x * x + 4.0 * x + 3.0))
///     .with_poles(&[-1.0, -3.0]);
/// assert!(rules::trapezoid(&f, -1.0, 0.0, 10).is_err());
/// assert!(rules::trapezoid(&f, 0.0, 1.0, 10).is_ok());
/// ```
pub fn trapezoid(f: &IntegrableFunction, a: f64, b: f64, n: usize) -> QuadResult<f64> {
    check_inputs(a, b, n, "trapezoid")?;

    let h = (b - a) / n as f64;
    let mut sum = 0.5 * (f.eval_checked(a, "trapezoid")? + f.eval_checked(b, "trapezoid")?);
    for i in 1..n {
        sum += f.eval_checked(a + i as f64 * h, "trapezoid")?;
    }

    Ok(sum * h)
}

fn check_inputs(a: f64, b: f64, n: usize, context: &str) -> QuadResult<()> {
    if n == 0 {
        return Err(QuadError::InvalidNodeCount {
            n,
            context: context.to_string(),
        });
    }
    if a >= b {
        return Err(QuadError::InvalidInterval {
            a,
            b,
            context: context.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn rational() -> IntegrableFunction {
        IntegrableFunction::new(|x: f64| 1.0 / (x * x + 4.0 * x + 3.0))
            .with_poles(&[-1.0, -3.0])
            .with_antiderivative(|x: f64| 0.5 * ((x + 1.0).abs() / (x + 3.0).abs()).ln())
    }

    fn smooth() -> IntegrableFunction {
        IntegrableFunction::new(|x: f64| x.sin())
    }

    #[test]
    fn test_constant() {
        // All three rules integrate a constant exactly
        let f = IntegrableFunction::new(|_| 5.0);
        assert_abs_diff_eq!(left_rectangle(&f, 0.0, 4.0, 8).unwrap(), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(midpoint(&f, 0.0, 4.0, 8).unwrap(), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trapezoid(&f, 0.0, 4.0, 8).unwrap(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_exact_for_symmetric_rules() {
        // Midpoint and trapezoid are exact for linear functions
        let f = IntegrableFunction::new(|x: f64| 2.0 * x);
        assert_abs_diff_eq!(midpoint(&f, 0.0, 3.0, 7).unwrap(), 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trapezoid(&f, 0.0, 3.0, 7).unwrap(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_left_rectangle_coarse_bound() {
        // Integral of 1/((x+1)(x+3)) over [0, 1] = 1/2 * ln(3/2) ~ 0.2027325541;
        // even 7 nodes keep the left rule within 0.05
        let f = rational();
        let approx_val = left_rectangle(&f, 0.0, 1.0, 7).unwrap();
        let exact = f.exact_integral(0.0, 1.0).unwrap();
        assert!((approx_val - exact).abs() < 0.05);
    }

    #[test]
    fn test_midpoint_error_decreases_under_doubling() {
        // Integral of sin over [0, pi] = 2; midpoint error is O(h^2), so the
        // error must shrink monotonically across four doublings of n
        let f = smooth();
        let mut prev_err = f64::INFINITY;
        for n in [5, 10, 20, 40, 80] {
            let err = (midpoint(&f, 0.0, PI, n).unwrap() - 2.0).abs();
            assert!(err < prev_err, "error did not decrease at n = {}", n);
            prev_err = err;
        }
        assert!(prev_err < 1e-3);
    }

    #[test]
    fn test_trapezoid_fails_on_boundary_pole() {
        let f = rational();
        // Pole at the left endpoint
        assert!(matches!(
            trapezoid(&f, -1.0, 0.0, 10),
            Err(QuadError::SingularityEncountered { x, .. }) if x == -1.0
        ));
        // Pole at the right endpoint
        assert!(matches!(
            trapezoid(&f, -2.0, -1.0, 10),
            Err(QuadError::SingularityEncountered { x, .. }) if x == -1.0
        ));
    }

    #[test]
    fn test_midpoint_survives_boundary_pole() {
        // Midpoint nodes avoid the endpoints, so the call succeeds even
        // though the value diverges as n grows
        let f = rational();
        assert!(midpoint(&f, -1.0, 0.0, 8).is_ok());
    }

    #[test]
    fn test_interior_node_on_pole() {
        // With an even split of [-2, 0], a trapezoid node lands exactly on -1
        let f = rational();
        assert!(matches!(
            trapezoid(&f, -2.0, 0.0, 2),
            Err(QuadError::SingularityEncountered { .. })
        ));
    }

    #[test]
    fn test_zero_nodes_rejected_by_all_rules() {
        let f = smooth();
        for rule in [
            QuadratureRule::LeftRectangle,
            QuadratureRule::Midpoint,
            QuadratureRule::Trapezoid,
        ] {
            assert!(matches!(
                rule.apply(&f, 0.0, 1.0, 0),
                Err(QuadError::InvalidNodeCount { n: 0, .. })
            ));
        }
    }

    #[test]
    fn test_invalid_interval() {
        let f = smooth();
        assert!(matches!(
            midpoint(&f, 1.0, 1.0, 5),
            Err(QuadError::InvalidInterval { .. })
        ));
        assert!(matches!(
            left_rectangle(&f, 2.0, 1.0, 5),
            Err(QuadError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_idempotence() {
        // No hidden state: identical inputs give bit-identical outputs
        let f = rational();
        let r1 = midpoint(&f, 0.0, 1.0, 37).unwrap();
        let r2 = midpoint(&f, 0.0, 1.0, 37).unwrap();
        assert_eq!(r1.to_bits(), r2.to_bits());

        let r1 = trapezoid(&f, 0.0, 1.0, 37).unwrap();
        let r2 = trapezoid(&f, 0.0, 1.0, 37).unwrap();
        assert_eq!(r1.to_bits(), r2.to_bits());
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(QuadratureRule::Midpoint.name(), "midpoint");
        assert_eq!(QuadratureRule::Trapezoid.name(), "trapezoid");
        assert_eq!(QuadratureRule::LeftRectangle.name(), "left_rectangle");
    }
}
