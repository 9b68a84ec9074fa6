//! Error types for quadrature and principal-value operations.

use std::fmt;

/// Result type for quadrature operations.
pub type QuadResult<T> = Result<T, QuadError>;

/// Errors that can occur during quadrature and principal-value computation.
///
/// Every failure is an explicit return value local to the call that produced
/// it; a failing step inside a convergence sweep never aborts the remaining
/// steps.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadError {
    /// Node count of zero, rejected before any evaluation.
    InvalidNodeCount { n: usize, context: String },

    /// Invalid interval provided (a >= b).
    InvalidInterval { a: f64, b: f64, context: String },

    /// Invalid parameter value (e.g. an excision width that reaches a bound).
    InvalidParameter { parameter: String, message: String },

    /// A required evaluation node coincides with a pole, or the evaluation
    /// came back non-finite.
    SingularityEncountered { x: f64, context: String },

    /// An exact-value operation was requested on a function registered
    /// without an antiderivative.
    MissingAntiderivative { context: String },

    /// The antiderivative-based principal value is undefined because the
    /// two-sided limit across the singularity is not declared to cancel.
    PrincipalValueUndefined { singularity: f64 },
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeCount { n, context } => {
                write!(f, "{}: node count must be positive (got {})", context, n)
            }
            Self::InvalidInterval { a, b, context } => {
                write!(
                    f,
                    "Invalid interval [{}, {}] in {}: bounds must satisfy a < b",
                    a, b, context
                )
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::SingularityEncountered { x, context } => {
                write!(f, "{}: singularity encountered at x = {:.6}", context, x)
            }
            Self::MissingAntiderivative { context } => {
                write!(f, "{}: no antiderivative registered", context)
            }
            Self::PrincipalValueUndefined { singularity } => {
                write!(
                    f,
                    "principal value undefined: divergence across x = {:.6} does not cancel",
                    singularity
                )
            }
        }
    }
}

impl std::error::Error for QuadError {}
