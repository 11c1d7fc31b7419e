//! Error types shared by every query entry point.

use thiserror::Error;

/// Errors surfaced by the metric engines.
///
/// All conditions are detected before the failing arithmetic; the engines
/// never return partial results. Short-circuit zero results (empty graph for
/// transitivity, zero triangles for clustering) are valid values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A caller contract violation: out-of-range mask or node index, or a
    /// mask built for a matrix of a different dimension.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A denominator evaluated to zero with no defined short-circuit,
    /// e.g. average clustering on a graph with no nodes.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// The request needs an algorithm outside the masked-matrix family;
    /// the caller must dispatch to a reference implementation.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
