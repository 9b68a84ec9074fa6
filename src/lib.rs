//! quadpv - elementary quadrature with singularity handling.
//!
//! Computes definite integrals of single-variable functions whose poles lie
//! inside or on the boundary of the integration interval, and contrasts the
//! numerical results against exact closed-form antiderivatives.
//!
//! # Available Methods
//!
//! | Method | Use Case | Endpoint Evaluation |
//! |--------|----------|---------------------|
//! | [`left_rectangle`] | First-order baseline | `a` only |
//! | [`midpoint`] | Default; robust against endpoint poles | never |
//! | [`trapezoid`] | Second order; demonstrates boundary-pole failure | `a` and `b` |
//! | [`cauchy_principal_value`] | Interior pole via symmetric excision | never |
//!
//! Every rule evaluates through a checked path: a node that coincides with a
//! declared pole (or produces a non-finite value) fails the call with
//! [`QuadError::SingularityEncountered`] instead of folding garbage into a
//! finite-looking sum.
//!
//! # Example
//!
//! ```
//! use quadpv::{cauchy_principal_value, exact_principal_value, IntegrableFunction};
//!
//! // f(x) = 1/((x+1)(x+3)) with F(x) = 1/2 * ln|(x+1)/(x+3)|; the log
//! // divergences of F cancel symmetrically across both simple poles
//! let f = IntegrableFunction::new(|x: f64| 1.0 / (x * x + 4.0 * x + 3.0))
//!     .with_poles(&[-1.0, -3.0])
//!     .with_antiderivative(|x: f64| 0.5 * ((x + 1.0).abs() / (x + 3.0).abs()).ln())
//!     .with_pv_cancellation(&[-1.0, -3.0]);
//!
//! let exact = exact_principal_value(&f, -2.0, 0.0, -1.0).unwrap();
//! let numeric = cauchy_principal_value(&f, -2.0, 0.0, -1.0, 200).unwrap();
//! assert!((numeric.value - exact).abs() < 0.05);
//! ```
//!
//! Convergence (and its absence near a pole) is observed with the sweep
//! helpers in [`convergence`].

pub mod convergence;
pub mod error;
pub mod function;
pub mod principal_value;
pub mod rules;
pub mod singularity;

pub use convergence::{
    sweep_epsilons, sweep_partitions, sweep_partitions_par, EpsilonStep, EpsilonTrace,
    PartitionStep, PartitionTrace,
};
pub use error::{QuadError, QuadResult};
pub use function::{IntegrableFunction, DEFAULT_POLE_TOLERANCE};
pub use principal_value::{
    cauchy_principal_value, cauchy_principal_value_with_epsilon, exact_principal_value,
    PrincipalValue, PvMode,
};
pub use rules::{left_rectangle, midpoint, trapezoid, QuadratureRule};
pub use singularity::{excision_window, has_singularity, split_nodes, ExcisionWindow, MIN_EPSILON};
