//! Remaining supply/demand bookkeeping shared by the greedy builders.

use crate::models::Allocation;

/// Tracks unsatisfied supply and demand while an initial allocation is built.
///
/// A row (column) is *active* while its remaining supply (demand) exceeds the
/// tolerance. Shipping always moves the largest quantity the binding side
/// allows and deactivates whichever side runs dry (both, on a tie).
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    supply: Vec<f64>,
    demand: Vec<f64>,
    row_active: Vec<bool>,
    col_active: Vec<bool>,
    tol: f64,
}

impl Ledger {
    pub(crate) fn new(supply: &[f64], demand: &[f64], tol: f64) -> Self {
        Self {
            supply: supply.to_vec(),
            demand: demand.to_vec(),
            row_active: supply.iter().map(|&s| s > tol).collect(),
            col_active: demand.iter().map(|&d| d > tol).collect(),
            tol,
        }
    }

    pub(crate) fn row_active(&self, i: usize) -> bool {
        self.row_active[i]
    }

    pub(crate) fn col_active(&self, j: usize) -> bool {
        self.col_active[j]
    }

    pub(crate) fn active_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.supply.len()).filter(move |&i| self.row_active[i])
    }

    pub(crate) fn active_cols(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.demand.len()).filter(move |&j| self.col_active[j])
    }

    /// Returns `true` while at least one row and one column remain active.
    pub(crate) fn has_work(&self) -> bool {
        self.row_active.iter().any(|&a| a) && self.col_active.iter().any(|&a| a)
    }

    /// Ships `min(remaining supply, remaining demand)` on `(i, j)`.
    ///
    /// Returns the shipped quantity.
    pub(crate) fn ship(&mut self, allocation: &mut Allocation, i: usize, j: usize) -> f64 {
        let quantity = self.supply[i].min(self.demand[j]).max(0.0);
        allocation.add(i, j, quantity);
        self.supply[i] -= quantity;
        self.demand[j] -= quantity;
        if self.supply[i] <= self.tol {
            self.row_active[i] = false;
        }
        if self.demand[j] <= self.tol {
            self.col_active[j] = false;
        }
        quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_activity() {
        let ledger = Ledger::new(&[5.0, 0.0], &[3.0, 2.0], 1e-6);
        assert!(ledger.row_active(0));
        assert!(!ledger.row_active(1));
        assert_eq!(ledger.active_cols().collect::<Vec<_>>(), vec![0, 1]);
        assert!(ledger.has_work());
    }

    #[test]
    fn test_ship_binding_side() {
        let mut ledger = Ledger::new(&[5.0], &[3.0, 2.0], 1e-6);
        let mut alloc = Allocation::new(1, 2);
        assert_eq!(ledger.ship(&mut alloc, 0, 0), 3.0);
        assert!(ledger.row_active(0));
        assert!(!ledger.col_active(0));
        assert_eq!(ledger.ship(&mut alloc, 0, 1), 2.0);
        assert!(!ledger.row_active(0));
        assert!(!ledger.has_work());
        assert_eq!(alloc.to_rows(), vec![vec![3.0, 2.0]]);
    }

    #[test]
    fn test_ship_tie_deactivates_both() {
        let mut ledger = Ledger::new(&[4.0, 1.0], &[4.0, 1.0], 1e-6);
        let mut alloc = Allocation::new(2, 2);
        ledger.ship(&mut alloc, 0, 0);
        assert!(!ledger.row_active(0));
        assert!(!ledger.col_active(0));
        assert_eq!(ledger.active_rows().collect::<Vec<_>>(), vec![1]);
    }
}
