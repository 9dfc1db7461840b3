//! Feasibility and optimality self-checks for a finished allocation.

use crate::cost::CostMatrix;
use crate::error::TransportError;
use crate::models::Allocation;
use crate::modi::{Basis, Potentials};

/// A feasibility violation found by [`check_feasibility`].
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A row ships a different total than its supply.
    RowSum {
        /// Source index.
        row: usize,
        /// Supply of the source.
        expected: f64,
        /// Quantity actually shipped.
        actual: f64,
    },
    /// A column receives a different total than its demand.
    ColumnSum {
        /// Destination index.
        col: usize,
        /// Demand of the destination.
        expected: f64,
        /// Quantity actually received.
        actual: f64,
    },
    /// A cell holds a negative quantity.
    NegativeQuantity {
        /// Source index.
        row: usize,
        /// Destination index.
        col: usize,
        /// The offending quantity.
        quantity: f64,
    },
}

/// Checks that `allocation` ships exactly `supply` and receives exactly
/// `demand`, within `tol` per row and column.
///
/// Returns every violation found; an empty list means feasible.
///
/// # Examples
///
/// ```
/// use u_transport::evaluation::check_feasibility;
/// use u_transport::models::Allocation;
///
/// let alloc = Allocation::from_rows(&[vec![300.0, 200.0], vec![0.0, 400.0]]).expect("valid");
/// assert!(check_feasibility(&[500.0, 400.0], &[300.0, 600.0], &alloc, 1e-6).is_empty());
/// assert_eq!(check_feasibility(&[500.0, 500.0], &[300.0, 600.0], &alloc, 1e-6).len(), 1);
/// ```
pub fn check_feasibility(
    supply: &[f64],
    demand: &[f64],
    allocation: &Allocation,
    tol: f64,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for i in 0..allocation.rows() {
        for j in 0..allocation.cols() {
            let q = allocation.get(i, j);
            if q < -tol {
                violations.push(Violation::NegativeQuantity {
                    row: i,
                    col: j,
                    quantity: q,
                });
            }
        }
    }
    for (i, &s) in supply.iter().enumerate() {
        let actual = allocation.row_sum(i);
        if (actual - s).abs() > tol {
            violations.push(Violation::RowSum {
                row: i,
                expected: s,
                actual,
            });
        }
    }
    for (j, &d) in demand.iter().enumerate() {
        let actual = allocation.col_sum(j);
        if (actual - d).abs() > tol {
            violations.push(Violation::ColumnSum {
                col: j,
                expected: d,
                actual,
            });
        }
    }

    violations
}

/// Certifies optimality of `allocation` against `basis`.
///
/// Recomputes potentials from the basis and returns `true` when every
/// non-basic opportunity cost is at least `-tol` and no non-basic cell
/// carries flow.
///
/// # Errors
///
/// Internal errors if `basis` is not a spanning tree.
pub fn check_optimality(
    costs: &CostMatrix,
    allocation: &Allocation,
    basis: &Basis,
    tol: f64,
) -> Result<bool, TransportError> {
    let potentials = Potentials::compute(basis, costs)?;

    for i in 0..basis.rows() {
        for j in 0..basis.cols() {
            if basis.contains(i, j) {
                continue;
            }
            if allocation.get(i, j) > tol {
                return Ok(false);
            }
            if potentials.opportunity_cost(costs, i, j) < -tol {
                return Ok(false);
            }
        }
    }
    Ok(true)
}
