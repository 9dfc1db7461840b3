//! North-West Corner rule.
//!
//! # Algorithm
//!
//! Start at the top-left cell. Ship as much as the current row and column
//! allow, then step down if the row ran dry, right if the column ran dry
//! (diagonally if both did). Ignores costs entirely.
//!
//! # Complexity
//!
//! O(m + n).

use crate::cost::CostMatrix;
use crate::models::Allocation;

use super::ledger::Ledger;

/// Builds an initial allocation with the North-West Corner rule.
///
/// # Arguments
///
/// * `supply` — Balanced supply per source
/// * `demand` — Balanced demand per destination
/// * `costs` — Unit costs (only its shape is used)
/// * `tol` — Quantities at or below this are treated as exhausted
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::constructive::north_west_corner;
///
/// let costs = CostMatrix::new(2, 2);
/// let alloc = north_west_corner(&[500.0, 400.0], &[300.0, 600.0], &costs, 1e-6);
/// assert_eq!(alloc.to_rows(), vec![vec![300.0, 200.0], vec![0.0, 400.0]]);
/// ```
pub fn north_west_corner(
    supply: &[f64],
    demand: &[f64],
    costs: &CostMatrix,
    tol: f64,
) -> Allocation {
    let m = supply.len();
    let n = demand.len();
    let mut allocation = Allocation::new(costs.rows(), costs.cols());
    let mut ledger = Ledger::new(supply, demand, tol);

    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        if !ledger.row_active(i) {
            i += 1;
            continue;
        }
        if !ledger.col_active(j) {
            j += 1;
            continue;
        }
        ledger.ship(&mut allocation, i, j);
    }

    allocation
}
