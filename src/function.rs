//! Integrand descriptions.
//!
//! An [`IntegrableFunction`] pairs a scalar function with its known pole
//! locations and, optionally, a closed-form antiderivative. The quadrature
//! rules and the principal-value engine only ever see this type.

use std::fmt;

use crate::error::{QuadError, QuadResult};
use crate::singularity::has_singularity;

/// Default tolerance for deciding that an abscissa is numerically
/// indistinguishable from a pole.
pub const DEFAULT_POLE_TOLERANCE: f64 = 1e-10;

type ScalarFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// A scalar function together with its singularity metadata.
///
/// The pole list and antiderivative are fixed at construction; the value is
/// immutable configuration data and safe to share across threads.
///
/// # Example
///
/// ```
/// use quadpv::IntegrableFunction;
///
/// // f(x) = 1/((x+1)(x+3)), F(x) = 1/2 * ln|(x+1)/(x+3)|
/// let f = IntegrableFunction::new(|x: f64| 1.0 / (x * x + 4.0 * x + 3.0))
///     .with_poles(&[-1.0, -3.0])
///     .with_antiderivative(|x: f64| 0.5 * ((x + 1.0).abs() / (x + 3.0).abs()).ln());
///
/// assert!(f.has_pole_in(-1.5, 0.0));
/// assert!(!f.has_pole_in(0.0, 1.0));
///
/// // Exact integral over [0, 1] is 1/2 * ln(3/2)
/// let exact = f.exact_integral(0.0, 1.0).unwrap();
/// assert!((exact - 0.5 * (1.5f64).ln()).abs() < 1e-12);
/// ```
pub struct IntegrableFunction {
    eval: ScalarFn,
    poles: Vec<f64>,
    antiderivative: Option<ScalarFn>,
    pv_cancels_at: Vec<f64>,
    pole_tolerance: f64,
}

impl IntegrableFunction {
    /// Wrap a scalar function with no declared poles.
    pub fn new<F>(eval: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            eval: Box::new(eval),
            poles: Vec::new(),
            antiderivative: None,
            pv_cancels_at: Vec::new(),
            pole_tolerance: DEFAULT_POLE_TOLERANCE,
        }
    }

    /// Declare the real pole locations of the function.
    pub fn with_poles(mut self, poles: &[f64]) -> Self {
        self.poles = poles.to_vec();
        self
    }

    /// Register a closed-form antiderivative.
    pub fn with_antiderivative<F>(mut self, antiderivative: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.antiderivative = Some(Box::new(antiderivative));
        self
    }

    /// Declare the poles across which the antiderivative's two-sided
    /// divergence cancels symmetrically.
    ///
    /// This is an analytic fact about the antiderivative (it holds for
    /// log-type antiderivatives of simple poles) and must be asserted by the
    /// caller; [`exact_principal_value`](crate::principal_value::exact_principal_value)
    /// refuses to produce a value across any pole not declared here.
    pub fn with_pv_cancellation(mut self, poles: &[f64]) -> Self {
        self.pv_cancels_at = poles.to_vec();
        self
    }

    /// Override the pole-coincidence tolerance (default `1e-10`).
    pub fn with_pole_tolerance(mut self, tolerance: f64) -> Self {
        self.pole_tolerance = tolerance;
        self
    }

    /// Raw evaluation, no singularity checks.
    pub fn eval(&self, x: f64) -> f64 {
        (self.eval)(x)
    }

    /// Evaluate at a quadrature node, failing if the node sits on a pole.
    ///
    /// # Errors
    ///
    /// Returns [`QuadError::SingularityEncountered`] if `x` is within the
    /// pole tolerance of a declared pole, or if the raw value is non-finite.
    pub fn eval_checked(&self, x: f64, context: &str) -> QuadResult<f64> {
        if self.near_pole(x) {
            return Err(QuadError::SingularityEncountered {
                x,
                context: context.to_string(),
            });
        }
        let fx = (self.eval)(x);
        if !fx.is_finite() {
            return Err(QuadError::SingularityEncountered {
                x,
                context: context.to_string(),
            });
        }
        Ok(fx)
    }

    /// The declared pole locations.
    pub fn poles(&self) -> &[f64] {
        &self.poles
    }

    /// The pole-coincidence tolerance.
    pub fn pole_tolerance(&self) -> f64 {
        self.pole_tolerance
    }

    /// True iff any declared pole lies in the closed, tolerance-padded
    /// interval `[a - tol, b + tol]`.
    pub fn has_pole_in(&self, a: f64, b: f64) -> bool {
        has_singularity(a, b, &self.poles, self.pole_tolerance)
    }

    /// Evaluate the antiderivative, if one was registered.
    pub fn antiderivative_at(&self, x: f64) -> Option<f64> {
        self.antiderivative.as_ref().map(|f| f(x))
    }

    /// True iff the antiderivative's divergence is declared to cancel
    /// across the pole `p`.
    pub fn pv_cancels_across(&self, p: f64) -> bool {
        self.pv_cancels_at
            .iter()
            .any(|&c| (c - p).abs() < self.pole_tolerance)
    }

    /// Exact definite integral `F(b) - F(a)` via the antiderivative.
    ///
    /// # Errors
    ///
    /// Returns [`QuadError::MissingAntiderivative`] if no antiderivative was
    /// registered, and [`QuadError::SingularityEncountered`] if either
    /// endpoint sits on a pole of `F`.
    pub fn exact_integral(&self, a: f64, b: f64) -> QuadResult<f64> {
        let fa = self.antiderivative_checked(a)?;
        let fb = self.antiderivative_checked(b)?;
        Ok(fb - fa)
    }

    fn antiderivative_checked(&self, x: f64) -> QuadResult<f64> {
        let f = self
            .antiderivative
            .as_ref()
            .ok_or_else(|| QuadError::MissingAntiderivative {
                context: "exact_integral".to_string(),
            })?;
        if self.near_pole(x) {
            return Err(QuadError::SingularityEncountered {
                x,
                context: "exact_integral".to_string(),
            });
        }
        let fx = f(x);
        if !fx.is_finite() {
            return Err(QuadError::SingularityEncountered {
                x,
                context: "exact_integral".to_string(),
            });
        }
        Ok(fx)
    }

    fn near_pole(&self, x: f64) -> bool {
        self.poles
            .iter()
            .any(|&p| (x - p).abs() < self.pole_tolerance)
    }
}

impl fmt::Debug for IntegrableFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegrableFunction")
            .field("poles", &self.poles)
            .field("has_antiderivative", &self.antiderivative.is_some())
            .field("pv_cancels_at", &self.pv_cancels_at)
            .field("pole_tolerance", &self.pole_tolerance)
            .finish()
    }
}
