//! Worker/task assignment as a peer service.
//!
//! [`AssignmentSolver`] is the contract production code consumes.
//! [`TransportAssignmentSolver`] fulfils it with this crate's own solver: an
//! `m × n` assignment is a transportation problem with unit supply and unit
//! demand, and the MODI optimum of such a problem is always integral.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::TransportProblem;
use crate::solver::{solve, SolverConfig};

use super::{PeerError, Sense};

/// Optimal pairing of rows (workers) to columns (tasks).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssignmentSolution {
    /// `true` if an optimal pairing was found.
    pub success: bool,
    /// Status message.
    pub message: String,
    /// Sum of the scores of all pairs, in the caller's units.
    pub total_score: f64,
    /// `(row, col)` pairs, sorted by row.
    pub pairs: Vec<(usize, usize)>,
    /// Score of each pair, aligned with `pairs`.
    pub scores: Vec<f64>,
}

/// A black-box assignment solver.
pub trait AssignmentSolver {
    /// Pairs each row with at most one column (and vice versa), assigning
    /// `min(rows, cols)` pairs with optimal total score.
    fn solve_assignment(
        &self,
        scores: &[Vec<f64>],
        sense: Sense,
    ) -> Result<AssignmentSolution, PeerError>;
}

/// Assignment through the transportation solver.
///
/// Scores are shifted to non-negative costs first: `c − min(c)` when
/// minimizing, `max(c) − c` when maximizing. Every feasible pairing has the
/// same number of pairs, so the shift does not change which one is optimal.
///
/// # Examples
///
/// ```
/// use u_transport::peers::{AssignmentSolver, Sense, TransportAssignmentSolver};
///
/// let scores = vec![
///     vec![9.0, 2.0, 7.0],
///     vec![6.0, 4.0, 3.0],
///     vec![5.0, 8.0, 1.0],
/// ];
/// let solver = TransportAssignmentSolver::default();
/// let best = solver.solve_assignment(&scores, Sense::Minimize).expect("solvable");
/// assert_eq!(best.pairs, vec![(0, 1), (1, 0), (2, 2)]);
/// assert_eq!(best.total_score, 9.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransportAssignmentSolver {
    config: SolverConfig,
}

impl TransportAssignmentSolver {
    /// Creates an adapter using `config` for the underlying solve.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl AssignmentSolver for TransportAssignmentSolver {
    fn solve_assignment(
        &self,
        scores: &[Vec<f64>],
        sense: Sense,
    ) -> Result<AssignmentSolution, PeerError> {
        let rows = scores.len();
        let cols = scores.first().map_or(0, Vec::len);
        for (i, row) in scores.iter().enumerate() {
            if row.len() != cols {
                return Err(PeerError::DimensionMismatch {
                    what: "score row",
                    expected: cols,
                    actual: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(PeerError::NonFinite {
                    what: "score matrix",
                    index: i * cols + j,
                });
            }
        }

        let flat = scores.iter().flatten().copied();
        let costs: Vec<Vec<f64>> = match sense {
            Sense::Minimize => {
                let min = flat.fold(f64::INFINITY, f64::min);
                shifted(scores, |s| s - min)
            }
            Sense::Maximize => {
                let max = flat.fold(f64::NEG_INFINITY, f64::max);
                shifted(scores, |s| max - s)
            }
        };

        let problem = TransportProblem::new(vec![1.0; rows], vec![1.0; cols], costs)
            .with_name("Assignment");
        let solution = solve(&problem, &self.config)?;

        let pairs: Vec<(usize, usize)> = solution
            .active_routes()
            .filter(|r| r.quantity > 0.5)
            .map(|r| (r.source_index, r.destination_index))
            .collect();
        let pair_scores: Vec<f64> = pairs.iter().map(|&(i, j)| scores[i][j]).collect();
        debug!(
            rows,
            cols,
            pairs = pairs.len(),
            iterations = solution.iterations(),
            "assignment solved"
        );

        Ok(AssignmentSolution {
            success: true,
            message: "Optimal assignment found".to_string(),
            total_score: pair_scores.iter().sum(),
            pairs,
            scores: pair_scores,
        })
    }
}

fn shifted(scores: &[Vec<f64>], f: impl Fn(f64) -> f64) -> Vec<Vec<f64>> {
    scores
        .iter()
        .map(|row| row.iter().map(|&s| f(s)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Exhaustive search; assumes no more rows than columns.
    fn brute_force(scores: &[Vec<f64>], sense: Sense) -> f64 {
        fn go(
            scores: &[Vec<f64>],
            row: usize,
            used: &mut [bool],
            acc: f64,
            best: &mut Option<f64>,
            sense: Sense,
        ) {
            if row == scores.len() {
                let better = match (*best, sense) {
                    (None, _) => true,
                    (Some(b), Sense::Minimize) => acc < b,
                    (Some(b), Sense::Maximize) => acc > b,
                };
                if better {
                    *best = Some(acc);
                }
                return;
            }
            for j in 0..used.len() {
                if !used[j] {
                    used[j] = true;
                    go(scores, row + 1, used, acc + scores[row][j], best, sense);
                    used[j] = false;
                }
            }
        }
        let mut best = None;
        let mut used = vec![false; scores[0].len()];
        go(scores, 0, &mut used, 0.0, &mut best, sense);
        best.unwrap_or(f64::NAN)
    }

    fn sample() -> Vec<Vec<f64>> {
        vec![
            vec![82.0, 83.0, 69.0, 92.0],
            vec![77.0, 37.0, 49.0, 92.0],
            vec![11.0, 69.0, 5.0, 86.0],
            vec![8.0, 9.0, 98.0, 23.0],
        ]
    }

    #[test]
    fn test_minimize_matches_brute_force() {
        let scores = sample();
        let sol = TransportAssignmentSolver::default()
            .solve_assignment(&scores, Sense::Minimize)
            .expect("solvable");
        assert!(sol.success);
        assert_eq!(sol.pairs.len(), 4);
        assert_eq!(sol.total_score, brute_force(&scores, Sense::Minimize));
        assert_eq!(sol.total_score, 140.0);
    }

    #[test]
    fn test_maximize_matches_brute_force() {
        let scores = sample();
        let sol = TransportAssignmentSolver::default()
            .solve_assignment(&scores, Sense::Maximize)
            .expect("solvable");
        assert_eq!(sol.total_score, brute_force(&scores, Sense::Maximize));
    }

    #[test]
    fn test_each_row_and_column_used_once() {
        let sol = TransportAssignmentSolver::default()
            .solve_assignment(&sample(), Sense::Minimize)
            .expect("solvable");
        let mut rows: Vec<_> = sol.pairs.iter().map(|p| p.0).collect();
        let mut cols: Vec<_> = sol.pairs.iter().map(|p| p.1).collect();
        rows.dedup();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(rows.len(), 4);
        assert_eq!(cols.len(), 4);
    }

    #[test]
    fn test_more_workers_than_tasks() {
        // Only two tasks: the two cheapest distinct-column workers win.
        let scores = vec![vec![4.0, 1.0], vec![2.0, 9.0], vec![3.0, 3.0]];
        let sol = TransportAssignmentSolver::default()
            .solve_assignment(&scores, Sense::Minimize)
            .expect("solvable");
        assert_eq!(sol.pairs, vec![(0, 1), (1, 0)]);
        assert_eq!(sol.total_score, 3.0);
    }

    #[test]
    fn test_negative_scores_shifted() {
        let scores = vec![vec![-5.0, 0.0], vec![0.0, -5.0]];
        let sol = TransportAssignmentSolver::default()
            .solve_assignment(&scores, Sense::Minimize)
            .expect("solvable");
        assert_eq!(sol.total_score, -10.0);
    }

    #[test]
    fn test_ragged_rejected() {
        let scores = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            TransportAssignmentSolver::default().solve_assignment(&scores, Sense::Minimize),
            Err(PeerError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_is_validation_error() {
        let err = TransportAssignmentSolver::default()
            .solve_assignment(&[], Sense::Minimize)
            .expect_err("no rows");
        match err {
            PeerError::Transport(e) => assert_eq!(e.kind(), ErrorKind::Validation),
            other => panic!("unexpected {other:?}"),
        }
    }
}
