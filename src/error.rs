//! Error types for transportation solves.
//!
//! Every failure is one of three kinds (see [`ErrorKind`]): bad input caught
//! before any allocation work, an internal inconsistency in the basic cell
//! set, or the MODI loop hitting its iteration cap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TransportSolution;

/// Classification of a [`TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller supplied an invalid problem or configuration.
    Validation,
    /// The basic cell set was not a spanning tree when it had to be.
    Internal,
    /// The iteration cap was reached while an improving route remained.
    NonConvergence,
}

/// Errors that can occur while validating or solving a transportation problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The supply vector is empty.
    #[error("problem has no sources")]
    NoSources,

    /// The demand vector is empty.
    #[error("problem has no destinations")]
    NoDestinations,

    /// The cost matrix has the wrong number of rows.
    #[error("cost matrix has {actual} rows but there are {expected} sources")]
    RowCountMismatch { expected: usize, actual: usize },

    /// A cost matrix row has the wrong number of entries.
    #[error("cost matrix row {row} has {actual} entries but there are {expected} destinations")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A supply entry is negative or not finite.
    #[error("supply at source {index} must be a non-negative number, got {value}")]
    InvalidSupply { index: usize, value: f64 },

    /// A demand entry is negative or not finite.
    #[error("demand at destination {index} must be a non-negative number, got {value}")]
    InvalidDemand { index: usize, value: f64 },

    /// A cost entry is negative or not finite.
    #[error("cost of route ({row}, {col}) must be a non-negative number, got {value}")]
    InvalidCost { row: usize, col: usize, value: f64 },

    /// A display-name list doesn't match the vector it labels.
    #[error("{what} has {actual} names but {expected} entries")]
    NameCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Supply or demand entries are finite but their sum is not.
    #[error("total {what} overflows to {value}")]
    NonFiniteTotal { what: &'static str, value: f64 },

    /// A stored solution's vectors or matrices disagree in size.
    #[error("solution {what} has {actual} entries, expected {expected}")]
    SolutionShape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A stored allocation entry is not finite.
    #[error("quantity on route ({row}, {col}) must be finite, got {value}")]
    InvalidQuantity { row: usize, col: usize, value: f64 },

    /// A stored basic cell lies outside the tableau.
    #[error("basic cell ({row}, {col}) is outside the {rows}x{cols} tableau")]
    BasicCellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A stored allocation does not ship supply to demand.
    #[error("allocation violates {violations} supply/demand constraints")]
    InfeasibleAllocation { violations: usize },

    /// The routes carrying flow in a stored allocation contain a cycle.
    #[error("allocation is not a basic solution: route ({row}, {col}) closes a cycle")]
    NonBasicAllocation { row: usize, col: usize },

    /// A solver setting is out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// The basic cell set does not have `rows + cols - 1` cells.
    #[error("basic cell set has {actual} cells, expected {expected}")]
    BasisSize { expected: usize, actual: usize },

    /// The basic cell set does not reach every row and column.
    #[error("basic cell set is disconnected: reached {reached} of {expected} rows and columns")]
    DisconnectedBasis { reached: usize, expected: usize },

    /// A cell closes a cycle in the basic cell set.
    #[error("basic cell ({row}, {col}) closes a cycle")]
    CyclicBasis { row: usize, col: usize },

    /// No closed loop exists for the entering cell.
    #[error("no closed loop through entering cell ({row}, {col})")]
    LoopNotFound { row: usize, col: usize },

    /// The iteration cap was reached before optimality was certified.
    #[error("did not reach certified optimum after {iterations} iterations")]
    NotConverged { iterations: usize },
}

impl TransportError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSources
            | Self::NoDestinations
            | Self::RowCountMismatch { .. }
            | Self::ColumnCountMismatch { .. }
            | Self::InvalidSupply { .. }
            | Self::InvalidDemand { .. }
            | Self::InvalidCost { .. }
            | Self::NameCountMismatch { .. }
            | Self::NonFiniteTotal { .. }
            | Self::SolutionShape { .. }
            | Self::InvalidQuantity { .. }
            | Self::BasicCellOutOfRange { .. }
            | Self::InfeasibleAllocation { .. }
            | Self::NonBasicAllocation { .. }
            | Self::InvalidConfig(_) => ErrorKind::Validation,
            Self::BasisSize { .. }
            | Self::DisconnectedBasis { .. }
            | Self::CyclicBasis { .. }
            | Self::LoopNotFound { .. } => ErrorKind::Internal,
            Self::NotConverged { .. } => ErrorKind::NonConvergence,
        }
    }
}

/// A failed solve.
///
/// Carries the error and, when the MODI loop ran out of iterations, the best
/// allocation reached so far (flagged as not optimal).
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct SolveError {
    #[source]
    error: TransportError,
    best: Option<Box<TransportSolution>>,
}

impl SolveError {
    /// Wraps an error with no partial result.
    pub fn new(error: TransportError) -> Self {
        Self { error, best: None }
    }

    /// Wraps an error together with the best solution found so far.
    pub fn with_best(error: TransportError, best: TransportSolution) -> Self {
        Self {
            error,
            best: Some(Box::new(best)),
        }
    }

    /// The underlying error.
    pub fn error(&self) -> &TransportError {
        &self.error
    }

    /// Category of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Best solution found before the failure, if any.
    pub fn best(&self) -> Option<&TransportSolution> {
        self.best.as_deref()
    }

    /// Consumes the error, returning the best solution found, if any.
    pub fn into_best(self) -> Option<TransportSolution> {
        self.best.map(|b| *b)
    }
}

impl From<TransportError> for SolveError {
    fn from(error: TransportError) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(TransportError::NoSources.kind(), ErrorKind::Validation);
        assert_eq!(
            TransportError::InvalidCost {
                row: 0,
                col: 1,
                value: -1.0
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            TransportError::BasicCellOutOfRange {
                row: 5,
                col: 5,
                rows: 2,
                cols: 2
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            TransportError::CyclicBasis { row: 1, col: 1 }.kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            TransportError::NotConverged { iterations: 5 }.kind(),
            ErrorKind::NonConvergence
        );
    }

    #[test]
    fn test_messages() {
        let e = TransportError::InvalidCost {
            row: 0,
            col: 1,
            value: -2.0,
        };
        assert_eq!(
            e.to_string(),
            "cost of route (0, 1) must be a non-negative number, got -2"
        );
        let e = TransportError::NotConverged { iterations: 7 };
        assert!(e.to_string().contains("did not reach certified optimum"));
    }

    #[test]
    fn test_solve_error_wraps() {
        let e = SolveError::from(TransportError::NoDestinations);
        assert_eq!(e.kind(), ErrorKind::Validation);
        assert!(e.best().is_none());
        assert_eq!(e.to_string(), "problem has no destinations");
    }
}
