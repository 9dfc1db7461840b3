//! Errors raised by peer solvers and their adapters.

use thiserror::Error;

use crate::error::SolveError;

/// Errors from LP and assignment peers.
#[derive(Debug, Clone, Error)]
pub enum PeerError {
    /// The objective has no coefficients.
    #[error("objective has no coefficients")]
    EmptyObjective,

    /// A matrix or vector has the wrong length.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A coefficient is NaN or infinite.
    #[error("{what} contains a non-finite value at {index}")]
    NonFinite { what: &'static str, index: usize },

    /// A variable's lower bound exceeds its upper bound.
    #[error("variable {index} has lower bound {lower} above upper bound {upper}")]
    InvalidBound { index: usize, lower: f64, upper: f64 },

    /// The underlying transportation solve failed.
    #[error(transparent)]
    Transport(#[from] SolveError),

    /// A peer reported a failure of its own.
    #[error("peer solver failed: {0}")]
    Solver(String),
}
