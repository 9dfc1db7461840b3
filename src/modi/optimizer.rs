//! MODI (modified distribution / u-v) improvement loop.
//!
//! # Algorithm
//!
//! Each iteration, starting from a basic feasible allocation:
//!
//! 1. Repair the basis to a spanning tree (no-op unless degenerate).
//! 2. Compute potentials `u`, `v` from the basis.
//! 3. Price every non-basic cell: `d[i][j] = c[i][j] - u[i] - v[j]`.
//! 4. If every `d ≥ -tol` the allocation is optimal; stop.
//! 5. Otherwise the most negative cell enters. Trace its closed loop, shift
//!    `θ = min(−cells)` around it (`+θ` on even positions, `−θ` on odd), and
//!    drop the `−` cell that hit zero from the basis.
//!
//! Each pivot lowers total cost by `θ · |d|`; only degenerate pivots
//! (`θ = 0`) leave it unchanged. The iteration cap turns any stalling into a
//! reported non-convergence instead of an endless loop.
//!
//! # Reference
//!
//! Charnes, A. & Cooper, W.W. (1954). "The Stepping Stone Method of
//! Explaining Linear Programming Calculations in Transportation Problems",
//! *Management Science* 1(1), 49-69.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cost::CostMatrix;
use crate::error::TransportError;
use crate::models::Allocation;

use super::basis::Basis;
use super::cycle::trace_loop;
use super::potentials::Potentials;

/// Where the MODI loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModiState {
    /// An improving route still exists.
    Improving,
    /// No non-basic route has a negative opportunity cost.
    Optimal,
}

/// One basis exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    /// Cell that joined the basis.
    pub entering: (usize, usize),
    /// Opportunity cost of the entering cell (negative).
    pub opportunity_cost: f64,
    /// Cell that left the basis.
    pub leaving: (usize, usize),
    /// Quantity shifted around the loop.
    pub quantity: f64,
}

/// Result of [`ModiOptimizer::run`].
#[derive(Debug, Clone)]
pub struct ModiOutcome {
    /// Final allocation.
    pub allocation: Allocation,
    /// Final basis (a spanning tree).
    pub basis: Basis,
    /// Number of pivots performed.
    pub iterations: usize,
    /// `Optimal`, or `Improving` if the iteration cap was hit.
    pub state: ModiState,
    /// Total cost at the start and after every pivot.
    pub cost_history: Vec<f64>,
}

/// Drives an allocation to optimality with the MODI method.
///
/// # Examples
///
/// ```
/// use u_transport::constructive::north_west_corner;
/// use u_transport::cost::CostMatrix;
/// use u_transport::modi::{Basis, ModiOptimizer, ModiState};
///
/// let costs = CostMatrix::from_rows(&[
///     vec![19.0, 30.0, 50.0, 10.0],
///     vec![70.0, 30.0, 40.0, 60.0],
///     vec![40.0, 8.0, 70.0, 20.0],
/// ])
/// .expect("valid");
/// let alloc = north_west_corner(&[7.0, 9.0, 18.0], &[5.0, 8.0, 7.0, 14.0], &costs, 1e-6);
/// let basis = Basis::from_allocation(&alloc, 1e-6);
///
/// let outcome = ModiOptimizer::new(&costs, 1e-6, 100)
///     .run(alloc, basis)
///     .expect("consistent basis");
/// assert_eq!(outcome.state, ModiState::Optimal);
/// assert!((outcome.allocation.total_cost(&costs) - 743.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ModiOptimizer<'a> {
    costs: &'a CostMatrix,
    tol: f64,
    max_iterations: usize,
}

impl<'a> ModiOptimizer<'a> {
    /// Creates an optimizer over `costs`.
    ///
    /// # Arguments
    ///
    /// * `costs` — Unit costs of the balanced problem
    /// * `tol` — Opportunity costs above `-tol` count as non-negative
    /// * `max_iterations` — Pivot budget before reporting non-convergence
    pub fn new(costs: &'a CostMatrix, tol: f64, max_iterations: usize) -> Self {
        Self {
            costs,
            tol,
            max_iterations,
        }
    }

    /// Pivot budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Repairs `basis`, prices all non-basic cells, and returns the entering
    /// cell with its opportunity cost, or `None` if the basis is optimal.
    ///
    /// The most negative opportunity cost wins; cells within `tol` of it tie
    /// and the lowest row, then lowest column, is taken.
    pub fn price(
        &self,
        basis: &mut Basis,
    ) -> Result<Option<((usize, usize), f64)>, TransportError> {
        basis.repair()?;
        let potentials = Potentials::compute(basis, self.costs)?;

        let mut min = f64::INFINITY;
        for i in 0..basis.rows() {
            for j in 0..basis.cols() {
                if !basis.contains(i, j) {
                    min = min.min(potentials.opportunity_cost(self.costs, i, j));
                }
            }
        }
        if min >= -self.tol {
            return Ok(None);
        }

        for i in 0..basis.rows() {
            for j in 0..basis.cols() {
                if basis.contains(i, j) {
                    continue;
                }
                let d = potentials.opportunity_cost(self.costs, i, j);
                if d <= min + self.tol {
                    return Ok(Some(((i, j), d)));
                }
            }
        }
        Ok(None)
    }

    /// Brings `entering` into the basis by shifting flow around its loop.
    ///
    /// The leaving cell is the `−` cell with the smallest quantity (ties to
    /// the lowest row, then column). Other `−` cells that reach zero stay
    /// basic at zero.
    pub fn pivot(
        &self,
        allocation: &mut Allocation,
        basis: &mut Basis,
        entering: (usize, usize),
        opportunity_cost: f64,
    ) -> Result<Pivot, TransportError> {
        let cycle = trace_loop(basis, entering)?;
        let minus: Vec<(usize, usize)> = cycle.iter().skip(1).step_by(2).copied().collect();

        let theta = minus
            .iter()
            .map(|&(i, j)| allocation.get(i, j))
            .fold(f64::INFINITY, f64::min)
            .max(0.0);
        let leaving = minus
            .iter()
            .copied()
            .filter(|&(i, j)| allocation.get(i, j) <= theta + self.tol)
            .min()
            .ok_or(TransportError::LoopNotFound {
                row: entering.0,
                col: entering.1,
            })?;

        for (k, &(i, j)) in cycle.iter().enumerate() {
            if k % 2 == 0 {
                allocation.add(i, j, theta);
            } else {
                allocation.add(i, j, -theta);
                if allocation.get(i, j) <= self.tol {
                    allocation.set(i, j, 0.0);
                }
            }
        }

        basis.remove(leaving.0, leaving.1);
        basis.insert(entering.0, entering.1);

        Ok(Pivot {
            entering,
            opportunity_cost,
            leaving,
            quantity: theta,
        })
    }

    /// Performs one MODI iteration. Returns `None` if already optimal.
    pub fn step(
        &self,
        allocation: &mut Allocation,
        basis: &mut Basis,
    ) -> Result<Option<Pivot>, TransportError> {
        match self.price(basis)? {
            Some((entering, d)) => self.pivot(allocation, basis, entering, d).map(Some),
            None => Ok(None),
        }
    }

    /// Iterates until optimal or the iteration cap is reached.
    ///
    /// # Errors
    ///
    /// Only internal consistency errors; hitting the cap is reported through
    /// [`ModiOutcome::state`].
    pub fn run(
        &self,
        mut allocation: Allocation,
        mut basis: Basis,
    ) -> Result<ModiOutcome, TransportError> {
        let mut cost_history = vec![allocation.total_cost(self.costs)];
        let mut iterations = 0;

        let state = loop {
            let Some((entering, d)) = self.price(&mut basis)? else {
                break ModiState::Optimal;
            };
            if iterations >= self.max_iterations {
                warn!(
                    iterations,
                    opportunity_cost = d,
                    "MODI iteration cap reached before optimality"
                );
                break ModiState::Improving;
            }

            let pivot = self.pivot(&mut allocation, &mut basis, entering, d)?;
            iterations += 1;
            let total_cost = allocation.total_cost(self.costs);
            cost_history.push(total_cost);
            debug!(
                iteration = iterations,
                entering = ?pivot.entering,
                opportunity_cost = pivot.opportunity_cost,
                leaving = ?pivot.leaving,
                quantity = pivot.quantity,
                total_cost,
                "MODI pivot"
            );
        };

        Ok(ModiOutcome {
            allocation,
            basis,
            iterations,
            state,
            cost_history,
        })
    }
}
