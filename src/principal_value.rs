//! Cauchy principal values.
//!
//! The numerical engine excises a symmetric band around an interior
//! singularity and integrates the two remaining sub-intervals with the
//! midpoint rule (the rule that never evaluates the excised boundary). The
//! exact engine goes through the antiderivative, but only across poles whose
//! two-sided divergence the function declares to cancel.

use crate::error::{QuadError, QuadResult};
use crate::function::IntegrableFunction;
use crate::rules::midpoint;
use crate::singularity::{excision_window, split_nodes, ExcisionWindow};

/// How a principal-value result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PvMode {
    /// The singularity was interior: symmetric excision plus two midpoint
    /// half-integrals.
    Excision,
    /// The declared singularity was outside `(a, b)`: plain midpoint
    /// quadrature over the whole interval. Not a true principal value.
    PlainQuadrature,
}

/// A numerical principal-value result, tagged with how it was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalValue {
    /// The computed value.
    pub value: f64,
    /// Whether the excision path or the degraded plain path produced it.
    pub mode: PvMode,
    /// The excision window used, when `mode` is [`PvMode::Excision`].
    pub window: Option<ExcisionWindow>,
}

/// Numerical Cauchy principal value with a policy-chosen excision width.
///
/// For a singularity strictly inside `(a, b)`, computes
/// `∫[a, s-ε] + ∫[s+ε, b]` with the midpoint rule on both halves, the
/// excision width and node split coming from
/// [`excision_window`](crate::singularity::excision_window). The node split
/// always satisfies `n_left + n_right == n`.
///
/// A singularity outside `(a, b)` degrades to plain midpoint quadrature over
/// all `n` nodes; the result is tagged [`PvMode::PlainQuadrature`] so the
/// caller can tell it is not a true principal value.
///
/// # Errors
///
/// [`QuadError::InvalidNodeCount`] for `n = 0`, or for `n = 1` with an
/// interior singularity (both halves need a node);
/// [`QuadError::InvalidInterval`] for `a >= b`;
/// [`QuadError::SingularityEncountered`] if a half-integral hits a pole.
///
/// # Example
///
/// ```
/// use quadpv::{cauchy_principal_value, IntegrableFunction, PvMode};
///
/// // P.V. of 1/x over [-1, 2] is ln(2)
/// let f = IntegrableFunction::new(|x: f64| 1.0 / x).with_poles(&[0.0]);
/// let pv = cauchy_principal_value(&f, -1.0, 2.0, 0.0, 300).unwrap();
/// assert_eq!(pv.mode, PvMode::Excision);
/// assert!((pv.value - 2.0f64.ln()).abs() < 0.05);
/// ```
pub fn cauchy_principal_value(
    f: &IntegrableFunction,
    a: f64,
    b: f64,
    singularity: f64,
    n: usize,
) -> QuadResult<PrincipalValue> {
    check_request(a, b, n, "cauchy_principal_value")?;

    let window = match excision_window(a, b, singularity, n) {
        Some(w) => w,
        None => return plain_fallback(f, a, b, n),
    };
    if window.n_left == 0 || window.n_right == 0 {
        return Err(QuadError::InvalidNodeCount {
            n,
            context: "cauchy_principal_value".to_string(),
        });
    }

    excised_value(f, a, b, singularity, window)
}

/// Numerical Cauchy principal value with a caller-supplied excision width.
///
/// Used by epsilon sweeps that demonstrate the `ε → 0` limit. The node split
/// between the halves follows the same proportional policy as
/// [`cauchy_principal_value`].
///
/// # Errors
///
/// In addition to the errors of [`cauchy_principal_value`],
/// [`QuadError::InvalidParameter`] when `epsilon` is non-positive or reaches
/// the nearer interval bound.
pub fn cauchy_principal_value_with_epsilon(
    f: &IntegrableFunction,
    a: f64,
    b: f64,
    singularity: f64,
    n: usize,
    epsilon: f64,
) -> QuadResult<PrincipalValue> {
    check_request(a, b, n, "cauchy_principal_value_with_epsilon")?;

    if singularity <= a || singularity >= b {
        return plain_fallback(f, a, b, n);
    }

    let min_gap = (singularity - a).min(b - singularity);
    if epsilon <= 0.0 || epsilon >= min_gap {
        return Err(QuadError::InvalidParameter {
            parameter: "epsilon".to_string(),
            message: format!(
                "must be positive and smaller than the distance {} to the nearer bound (got {})",
                min_gap, epsilon
            ),
        });
    }
    if n < 2 {
        return Err(QuadError::InvalidNodeCount {
            n,
            context: "cauchy_principal_value_with_epsilon".to_string(),
        });
    }

    let (n_left, n_right) = split_nodes(a, b, singularity, epsilon, n);
    let window = ExcisionWindow {
        epsilon,
        left_end: singularity - epsilon,
        right_start: singularity + epsilon,
        n_left,
        n_right,
    };

    excised_value(f, a, b, singularity, window)
}

/// Exact principal value through the antiderivative.
///
/// For an interior singularity the symmetric limit equals `F(b) - F(a)`
/// exactly when the antiderivative's two-sided divergence cancels, an
/// analytic property the function must declare via
/// [`IntegrableFunction::with_pv_cancellation`]. Without the declaration the
/// result is [`QuadError::PrincipalValueUndefined`], never a number with a
/// silently wrong meaning.
///
/// A singularity outside `(a, b)` degrades to the plain exact integral,
/// mirroring the numerical engine's fallback.
pub fn exact_principal_value(
    f: &IntegrableFunction,
    a: f64,
    b: f64,
    singularity: f64,
) -> QuadResult<f64> {
    if a >= b {
        return Err(QuadError::InvalidInterval {
            a,
            b,
            context: "exact_principal_value".to_string(),
        });
    }

    if singularity > a && singularity < b && !f.pv_cancels_across(singularity) {
        return Err(QuadError::PrincipalValueUndefined { singularity });
    }

    f.exact_integral(a, b)
}

fn check_request(a: f64, b: f64, n: usize, context: &str) -> QuadResult<()> {
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

fn plain_fallback(f: &IntegrableFunction, a: f64, b: f64, n: usize) -> QuadResult<PrincipalValue> {
    let value = midpoint(f, a, b, n)?;
    Ok(PrincipalValue {
        value,
        mode: PvMode::PlainQuadrature,
        window: None,
    })
}

fn excised_value(
    f: &IntegrableFunction,
    a: f64,
    b: f64,
    singularity: f64,
    window: ExcisionWindow,
) -> QuadResult<PrincipalValue> {
    let left = midpoint(f, a, window.left_end, window.n_left)?;
    let right = midpoint(f, window.right_start, b, window.n_right)?;
    let value = left + right;

    if !value.is_finite() {
        return Err(QuadError::SingularityEncountered {
            x: singularity,
            context: "cauchy_principal_value".to_string(),
        });
    }

    Ok(PrincipalValue {
        value,
        mode: PvMode::Excision,
        window: Some(window),
    })
}
