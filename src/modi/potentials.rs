//! Row and column potentials (dual values).
//!
//! # Algorithm
//!
//! For every basic cell the potentials must reproduce its cost exactly:
//!
//! ```text
//! u[i] + v[j] = c[i][j]      for every basic (i, j)
//! ```
//!
//! The system has one degree of freedom, fixed by `u[0] = 0`. A breadth-first
//! walk of the basis tree from row 0 then determines every other value from
//! its already-known neighbor.

use std::collections::VecDeque;

use crate::cost::CostMatrix;
use crate::error::TransportError;

use super::basis::Basis;

/// A tree node: row `i` is `i`, column `j` is `rows + j`.
type Node = usize;

/// Potentials for one basis.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
/// use u_transport::modi::{Basis, Potentials};
///
/// let costs = CostMatrix::from_rows(&[vec![4.0, 6.0], vec![5.0, 3.0]]).expect("valid");
/// let basis = Basis::from_cells(2, 2, [(0, 0), (0, 1), (1, 1)]);
/// let p = Potentials::compute(&basis, &costs).expect("spanning tree");
///
/// assert_eq!(p.row(0), 0.0);
/// assert_eq!(p.col(0), 4.0);
/// assert_eq!(p.col(1), 6.0);
/// assert_eq!(p.row(1), -3.0);
/// // Non-basic (1,0): 5 - (-3) - 4 = 4 ≥ 0.
/// assert_eq!(p.opportunity_cost(&costs, 1, 0), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Potentials {
    u: Vec<f64>,
    v: Vec<f64>,
}

impl Potentials {
    /// Computes potentials from a spanning-tree basis.
    ///
    /// # Errors
    ///
    /// Internal errors if the basis has the wrong size, contains a cycle, or
    /// does not reach every row and column.
    pub fn compute(basis: &Basis, costs: &CostMatrix) -> Result<Self, TransportError> {
        let m = basis.rows();
        let n = basis.cols();
        if basis.len() != basis.required() {
            return Err(TransportError::BasisSize {
                expected: basis.required(),
                actual: basis.len(),
            });
        }

        let (row_adj, col_adj) = basis.adjacency();
        let mut u: Vec<Option<f64>> = vec![None; m];
        let mut v: Vec<Option<f64>> = vec![None; n];
        let mut parent: Vec<Option<Node>> = vec![None; m + n];

        u[0] = Some(0.0);
        let mut queue: VecDeque<Node> = VecDeque::from([0]);
        let mut reached = 1;

        while let Some(node) = queue.pop_front() {
            if node < m {
                let i = node;
                let ui = u[i].unwrap_or_default();
                for &j in &row_adj[i] {
                    if parent[i] == Some(m + j) {
                        continue;
                    }
                    if v[j].is_some() {
                        return Err(TransportError::CyclicBasis { row: i, col: j });
                    }
                    v[j] = Some(costs.get(i, j) - ui);
                    parent[m + j] = Some(i);
                    queue.push_back(m + j);
                    reached += 1;
                }
            } else {
                let j = node - m;
                let vj = v[j].unwrap_or_default();
                for &i in &col_adj[j] {
                    if parent[m + j] == Some(i) {
                        continue;
                    }
                    if u[i].is_some() {
                        return Err(TransportError::CyclicBasis { row: i, col: j });
                    }
                    u[i] = Some(costs.get(i, j) - vj);
                    parent[i] = Some(m + j);
                    queue.push_back(i);
                    reached += 1;
                }
            }
        }

        if reached < m + n {
            return Err(TransportError::DisconnectedBasis {
                reached,
                expected: m + n,
            });
        }

        Ok(Self {
            u: u.into_iter().map(Option::unwrap_or_default).collect(),
            v: v.into_iter().map(Option::unwrap_or_default).collect(),
        })
    }

    /// Potential of row `i`.
    pub fn row(&self, i: usize) -> f64 {
        self.u[i]
    }

    /// Potential of column `j`.
    pub fn col(&self, j: usize) -> f64 {
        self.v[j]
    }

    /// All row potentials.
    pub fn rows(&self) -> &[f64] {
        &self.u
    }

    /// All column potentials.
    pub fn cols(&self) -> &[f64] {
        &self.v
    }

    /// Per-unit change in total cost from routing flow through `(i, j)`:
    /// `c[i][j] - u[i] - v[j]`. Zero for basic cells.
    pub fn opportunity_cost(&self, costs: &CostMatrix, i: usize, j: usize) -> f64 {
        costs.get(i, j) - self.u[i] - self.v[j]
    }
}
