//! Least-Cost (matrix minimum) method.
//!
//! # Algorithm
//!
//! Repeatedly pick the cheapest cell whose row and column are both still
//! active and ship as much as possible on it. Ties go to the lowest row,
//! then the lowest column.
//!
//! # Complexity
//!
//! O((m + n) · m · n).

use crate::cost::CostMatrix;
use crate::models::Allocation;

use super::ledger::Ledger;

/// Builds an initial allocation with the Least-Cost method.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::constructive::least_cost;
///
/// let costs = CostMatrix::from_rows(&[vec![4.0, 6.0], vec![5.0, 3.0]]).expect("valid");
/// let alloc = least_cost(&[500.0, 400.0], &[300.0, 600.0], &costs, 1e-6);
/// // (1,1) at cost 3 goes first, then (0,0) at cost 4.
/// assert_eq!(alloc.to_rows(), vec![vec![300.0, 200.0], vec![0.0, 400.0]]);
/// ```
pub fn least_cost(supply: &[f64], demand: &[f64], costs: &CostMatrix, tol: f64) -> Allocation {
    let mut allocation = Allocation::new(costs.rows(), costs.cols());
    let mut ledger = Ledger::new(supply, demand, tol);

    while ledger.has_work() {
        let cols: Vec<usize> = ledger.active_cols().collect();
        let candidates = ledger
            .active_rows()
            .flat_map(|i| cols.iter().map(move |&j| (i, j)));
        let Some((i, j)) = costs.cheapest(candidates) else {
            break;
        };
        ledger.ship(&mut allocation, i, j);
    }

    allocation
}
