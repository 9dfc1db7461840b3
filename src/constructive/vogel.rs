//! Vogel's Approximation Method (VAM).
//!
//! # Algorithm
//!
//! For every active row and column compute a *penalty*: the gap between its
//! two cheapest active cells (or the single cost, when only one active cell
//! is left). The line with the largest penalty is the one where choosing
//! wrongly hurts most, so ship as much as possible on its cheapest cell:
//!
//! ```text
//! penalty(line) = c₂ - c₁      (c₁ ≤ c₂ the two smallest active costs)
//! penalty(line) = c₁           (only one active cell)
//! ```
//!
//! Ties are broken deterministically: rows before columns, then the lowest
//! index. Within the chosen line the cheapest cell wins, ties to the lowest
//! column (for a row) or the lowest row (for a column).
//!
//! # Complexity
//!
//! O((m + n)² · max(m, n)).
//!
//! # Reference
//!
//! Reinfeld, N.V. & Vogel, W.R. (1958). *Mathematical Programming*.
//! Prentice-Hall.

use crate::cost::CostMatrix;
use crate::models::Allocation;

use super::ledger::Ledger;

/// A row or column selected by penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    Row(usize),
    Col(usize),
}

/// Builds an initial allocation with Vogel's Approximation Method.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::constructive::vogel_approximation;
///
/// let costs = CostMatrix::from_rows(&[vec![4.0, 6.0], vec![5.0, 3.0]]).expect("valid");
/// let alloc = vogel_approximation(&[500.0, 400.0], &[300.0, 600.0], &costs, 1e-6);
/// assert!((alloc.total_cost(&costs) - 3600.0).abs() < 1e-9);
/// ```
pub fn vogel_approximation(
    supply: &[f64],
    demand: &[f64],
    costs: &CostMatrix,
    tol: f64,
) -> Allocation {
    let mut allocation = Allocation::new(costs.rows(), costs.cols());
    let mut ledger = Ledger::new(supply, demand, tol);

    while ledger.has_work() {
        let Some(line) = select_line(&ledger, costs, tol) else {
            break;
        };
        let cell = match line {
            Line::Row(i) => costs.cheapest(ledger.active_cols().map(|j| (i, j))),
            Line::Col(j) => costs.cheapest(ledger.active_rows().map(|i| (i, j))),
        };
        let Some((i, j)) = cell else {
            break;
        };
        ledger.ship(&mut allocation, i, j);
    }

    allocation
}

/// Picks the active line with the largest penalty.
///
/// Rows are scanned before columns and a later line only wins when its
/// penalty is larger by more than `tol`.
fn select_line(ledger: &Ledger, costs: &CostMatrix, tol: f64) -> Option<Line> {
    let row_penalties = ledger.active_rows().filter_map(|i| {
        penalty(ledger.active_cols().map(|j| costs.get(i, j))).map(|p| (Line::Row(i), p))
    });
    let col_penalties = ledger.active_cols().filter_map(|j| {
        penalty(ledger.active_rows().map(|i| costs.get(i, j))).map(|p| (Line::Col(j), p))
    });

    let mut best: Option<(Line, f64)> = None;
    for (line, p) in row_penalties.chain(col_penalties) {
        match best {
            Some((_, b)) if p <= b + tol => {}
            _ => best = Some((line, p)),
        }
    }
    best.map(|(line, _)| line)
}

/// Difference between the two smallest costs, or the cost itself when only
/// one is given. `None` when there are no costs.
fn penalty<I>(costs: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut lowest = f64::INFINITY;
    let mut second = f64::INFINITY;
    let mut count = 0usize;
    for c in costs {
        count += 1;
        if c < lowest {
            second = lowest;
            lowest = c;
        } else if c < second {
            second = c;
        }
    }
    match count {
        0 => None,
        1 => Some(lowest),
        _ => Some(second - lowest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty() {
        assert_eq!(penalty([4.0, 6.0, 5.0]), Some(1.0));
        assert_eq!(penalty([3.0, 3.0]), Some(0.0));
        assert_eq!(penalty([7.0]), Some(7.0));
        assert_eq!(penalty(std::iter::empty()), None);
    }

    #[test]
    fn test_vam_textbook() {
        // Classic 3×4 example: VAM gives 779 (the optimum is 743).
        let costs = CostMatrix::from_rows(&[
            vec![19.0, 30.0, 50.0, 10.0],
            vec![70.0, 30.0, 40.0, 60.0],
            vec![40.0, 8.0, 70.0, 20.0],
        ])
        .expect("valid");
        let supply = [7.0, 9.0, 18.0];
        let demand = [5.0, 8.0, 7.0, 14.0];
        let alloc = vogel_approximation(&supply, &demand, &costs, 1e-6);
        assert!((alloc.total_cost(&costs) - 779.0).abs() < 1e-9);
        for i in 0..3 {
            assert!((alloc.row_sum(i) - supply[i]).abs() < 1e-9);
        }
        for j in 0..4 {
            assert!((alloc.col_sum(j) - demand[j]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vam_row_tie_prefers_lower_column() {
        // Every penalty is 0, so row 0 is chosen and all its cells tie.
        let costs =
            CostMatrix::from_rows(&[vec![2.0, 2.0, 2.0], vec![2.0, 2.0, 2.0]]).expect("valid");
        let alloc = vogel_approximation(&[4.0, 6.0], &[5.0, 2.0, 3.0], &costs, 1e-6);
        assert_eq!(alloc.get(0, 0), 4.0);
        assert_eq!(alloc.get(0, 1), 0.0);
    }

    #[test]
    fn test_vam_penalty_tie_prefers_row() {
        // Row penalties 2, 6 and column penalties 2, 6: row 1 beats column 1.
        let costs = CostMatrix::from_rows(&[vec![1.0, 3.0], vec![3.0, 9.0]]).expect("valid");
        let ledger = Ledger::new(&[1.0, 1.0], &[1.0, 1.0], 1e-6);
        assert_eq!(select_line(&ledger, &costs, 1e-6), Some(Line::Row(1)));
    }

    #[test]
    fn test_vam_is_reproducible() {
        let costs = CostMatrix::from_rows(&[
            vec![2.0, 2.0, 2.0],
            vec![2.0, 2.0, 2.0],
            vec![2.0, 2.0, 2.0],
        ])
        .expect("valid");
        let a = vogel_approximation(&[3.0, 3.0, 3.0], &[3.0, 3.0, 3.0], &costs, 1e-6);
        let b = vogel_approximation(&[3.0, 3.0, 3.0], &[3.0, 3.0, 3.0], &costs, 1e-6);
        assert_eq!(a, b);
        assert_eq!(a.get(0, 0), 3.0);
    }
}
