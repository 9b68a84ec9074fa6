//! Convergence diagnostics.
//!
//! Sweeps a quadrature rule over increasing partition counts, or the
//! principal-value engine over shrinking excision widths, recording one
//! result per step. A failing step is recorded in place of a value; it never
//! aborts the rest of the sweep. Consuming the trace shows whether values
//! stabilize (convergence) or oscillate and grow (divergence near a pole).

use rayon::prelude::*;

use crate::error::QuadResult;
use crate::function::IntegrableFunction;
use crate::principal_value::cauchy_principal_value_with_epsilon;
use crate::rules::QuadratureRule;

/// One step of a partition-count sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionStep {
    /// The node count used for this step.
    pub n: usize,
    /// The rule's result at this node count.
    pub result: QuadResult<f64>,
}

/// One step of an excision-width sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonStep {
    /// The excision half-width used for this step.
    pub epsilon: f64,
    /// The principal value at this width.
    pub result: QuadResult<f64>,
}

/// A materialized partition sweep.
pub type PartitionTrace = Vec<PartitionStep>;

/// A materialized epsilon sweep.
pub type EpsilonTrace = Vec<EpsilonStep>;

/// Sweep a quadrature rule over every node count in `[n_min, n_max]`.
///
/// Lazy: each step is computed when the iterator is advanced, and the
/// iterator is consumed exactly once.
///
/// # Example
///
/// ```
/// use quadpv::{sweep_partitions, IntegrableFunction, QuadratureRule};
///
/// // The trapezoid rule cannot even start on [-1, 0]: the pole sits on the
/// // boundary, so every step fails and the failures are recorded in place
/// let f = IntegrableFunction::new(|x: f64| 1.0 / (x * x + 4.0 * x + 3.0))
///     .with_poles(&[-1.0, -3.0]);
/// let trace: Vec<_> =
///     sweep_partitions(&f, -1.0, 0.0, QuadratureRule::Trapezoid, 2, 10).collect();
/// assert_eq!(trace.len(), 9);
/// assert!(trace.iter().all(|step| step.result.is_err()));
/// ```
pub fn sweep_partitions<'a>(
    f: &'a IntegrableFunction,
    a: f64,
    b: f64,
    rule: QuadratureRule,
    n_min: usize,
    n_max: usize,
) -> impl Iterator<Item = PartitionStep> + 'a {
    (n_min..=n_max).map(move |n| PartitionStep {
        n,
        result: rule.apply(f, a, b, n),
    })
}

/// Parallel, materialized variant of [`sweep_partitions`].
///
/// Steps are independent, so this is purely a performance option; the trace
/// is identical to collecting the sequential sweep.
pub fn sweep_partitions_par(
    f: &IntegrableFunction,
    a: f64,
    b: f64,
    rule: QuadratureRule,
    n_min: usize,
    n_max: usize,
) -> PartitionTrace {
    (n_min..=n_max)
        .into_par_iter()
        .map(|n| PartitionStep {
            n,
            result: rule.apply(f, a, b, n),
        })
        .collect()
}

/// Sweep the principal-value engine over caller-supplied excision widths.
///
/// Each step drives
/// [`cauchy_principal_value_with_epsilon`](crate::principal_value::cauchy_principal_value_with_epsilon)
/// with a fixed node budget; shrinking widths demonstrate the `ε → 0` limit
/// that defines the principal value.
pub fn sweep_epsilons<'a>(
    f: &'a IntegrableFunction,
    a: f64,
    b: f64,
    singularity: f64,
    n: usize,
    epsilons: &'a [f64],
) -> impl Iterator<Item = EpsilonStep> + 'a {
    epsilons.iter().map(move |&epsilon| EpsilonStep {
        epsilon,
        result: cauchy_principal_value_with_epsilon(f, a, b, singularity, n, epsilon)
            .map(|pv| pv.value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuadError;
    use crate::principal_value::exact_principal_value;

    fn rational() -> IntegrableFunction {
        IntegrableFunction::new(|x: f64| 1.0 / (x * x + 4.0 * x + 3.0))
            .with_poles(&[-1.0, -3.0])
            .with_antiderivative(|x: f64| 0.5 * ((x + 1.0).abs() / (x + 3.0).abs()).ln())
            .with_pv_cancellation(&[-1.0, -3.0])
    }

    #[test]
    fn test_sweep_records_failures_and_continues() {
        // Trapezoid on [-1, 0] evaluates the pole at -1 for every n
        let f = rational();
        let trace: PartitionTrace =
            sweep_partitions(&f, -1.0, 0.0, QuadratureRule::Trapezoid, 2, 10).collect();
        assert_eq!(trace.len(), 9);
        for step in &trace {
            assert!(matches!(
                step.result,
                Err(QuadError::SingularityEncountered { x, .. }) if x == -1.0
            ));
        }
    }

    #[test]
    fn test_sweep_mixed_steps() {
        // n = 0 fails, the rest succeed; the failure does not stop the sweep
        let f = IntegrableFunction::new(|x: f64| x.exp());
        let trace: PartitionTrace =
            sweep_partitions(&f, 0.0, 1.0, QuadratureRule::Midpoint, 0, 5).collect();
        assert_eq!(trace.len(), 6);
        assert!(matches!(
            trace[0].result,
            Err(QuadError::InvalidNodeCount { n: 0, .. })
        ));
        assert!(trace[1..].iter().all(|step| step.result.is_ok()));
    }

    #[test]
    fn test_sweep_converges_on_smooth_function() {
        // Integral of e^x over [0, 1] = e - 1; midpoint errors shrink with n
        let f = IntegrableFunction::new(|x: f64| x.exp());
        let exact = std::f64::consts::E - 1.0;
        let trace: PartitionTrace =
            sweep_partitions(&f, 0.0, 1.0, QuadratureRule::Midpoint, 2, 64).collect();
        let first_err = (trace.first().unwrap().result.clone().unwrap() - exact).abs();
        let last_err = (trace.last().unwrap().result.clone().unwrap() - exact).abs();
        assert!(last_err < first_err / 100.0);
        assert!(last_err < 1e-4);
    }

    #[test]
    fn test_sweep_diverges_across_interior_pole() {
        // Midpoint on [-1, 0] never hits the boundary pole, but the values
        // grow without bound instead of stabilizing
        let f = rational();
        let at = |n| {
            sweep_partitions(&f, -1.0, 0.0, QuadratureRule::Midpoint, n, n)
                .next()
                .unwrap()
                .result
                .unwrap()
        };
        assert!(at(160) > at(10) + 0.5);
    }

    #[test]
    fn test_par_sweep_matches_sequential() {
        let f = rational();
        let seq: PartitionTrace =
            sweep_partitions(&f, 0.0, 1.0, QuadratureRule::Trapezoid, 1, 32).collect();
        let par = sweep_partitions_par(&f, 0.0, 1.0, QuadratureRule::Trapezoid, 1, 32);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_epsilon_sweep_stabilizes() {
        let f = rational();
        let exact = exact_principal_value(&f, -2.0, 0.0, -1.0).unwrap();
        let epsilons = [1e-1, 1e-2, 1e-3, 1e-4];
        let trace: EpsilonTrace = sweep_epsilons(&f, -2.0, 0.0, -1.0, 400, &epsilons).collect();
        assert_eq!(trace.len(), 4);
        let last = trace.last().unwrap().result.clone().unwrap();
        assert!((last - exact).abs() < 0.02, "last = {}", last);
    }

    #[test]
    fn test_epsilon_sweep_records_invalid_widths() {
        // A width reaching the bound is recorded as a failing step
        let f = rational();
        let epsilons = [2.0, 1e-2];
        let trace: EpsilonTrace = sweep_epsilons(&f, -2.0, 0.0, -1.0, 100, &epsilons).collect();
        assert!(matches!(
            trace[0].result,
            Err(QuadError::InvalidParameter { .. })
        ));
        assert!(trace[1].result.is_ok());
    }
}
