//! Solved transportation plan.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::balance::Balance;
use crate::constructive::InitialStrategy;
use crate::cost::CostMatrix;
use crate::error::TransportError;
use crate::evaluation::check_feasibility;
use crate::modi::Basis;

use super::problem::first_invalid;
use super::{Allocation, RouteDetail};

/// Whether a solution's optimality was certified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Every non-basic opportunity cost is non-negative.
    Optimal,
    /// Satisfies supply and demand, but optimality was not checked or not reached.
    Feasible,
}

/// A feasible (and usually optimal) distribution plan.
///
/// Matrices and vectors are those of the balanced problem, so a synthetic
/// row or column appears as the last one when the balancer added it.
/// Built by [`crate::solver::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSolution {
    pub(crate) total_cost: f64,
    pub(crate) allocation: Allocation,
    pub(crate) costs: CostMatrix,
    pub(crate) supply: Vec<f64>,
    pub(crate) demand: Vec<f64>,
    pub(crate) source_names: Vec<String>,
    pub(crate) destination_names: Vec<String>,
    pub(crate) routes: Vec<RouteDetail>,
    pub(crate) is_optimal: bool,
    pub(crate) iterations: usize,
    pub(crate) strategy: InitialStrategy,
    pub(crate) balance: Balance,
    pub(crate) basic_cells: Vec<(usize, usize)>,
    pub(crate) cost_history: Vec<f64>,
}

impl TransportSolution {
    /// Sum of `quantity × unit cost` over every cell of the allocation.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Final allocation (balanced dimensions).
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Unit costs (balanced dimensions).
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Supply per source (balanced).
    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    /// Demand per destination (balanced).
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    /// Total supply of the real sources, excluding any synthetic source.
    pub fn total_supply(&self) -> f64 {
        let total: f64 = self.supply.iter().sum();
        match self.balance {
            Balance::DummySource { quantity } => total - quantity,
            _ => total,
        }
    }

    /// Total demand of the real destinations, excluding any synthetic destination.
    pub fn total_demand(&self) -> f64 {
        let total: f64 = self.demand.iter().sum();
        match self.balance {
            Balance::DummyDestination { quantity } => total - quantity,
            _ => total,
        }
    }

    /// Source display names.
    pub fn source_names(&self) -> &[String] {
        &self.source_names
    }

    /// Destination display names.
    pub fn destination_names(&self) -> &[String] {
        &self.destination_names
    }

    /// Every route with a positive quantity, in row-major order.
    pub fn routes(&self) -> &[RouteDetail] {
        &self.routes
    }

    /// Routes between real sources and destinations only.
    pub fn active_routes(&self) -> impl Iterator<Item = &RouteDetail> {
        self.routes.iter().filter(|r| !r.is_dummy)
    }

    /// Returns `true` if optimality was certified.
    pub fn is_optimal(&self) -> bool {
        self.is_optimal
    }

    /// [`SolveStatus::Optimal`] or [`SolveStatus::Feasible`].
    pub fn status(&self) -> SolveStatus {
        if self.is_optimal {
            SolveStatus::Optimal
        } else {
            SolveStatus::Feasible
        }
    }

    /// Human-readable summary of the status.
    pub fn message(&self) -> &'static str {
        match self.status() {
            SolveStatus::Optimal => "Optimal solution found",
            SolveStatus::Feasible => "Initial solution found",
        }
    }

    /// MODI iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Strategy that built the initial allocation.
    pub fn strategy(&self) -> InitialStrategy {
        self.strategy
    }

    /// How the problem was balanced.
    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Final basic cells in row-major order, including zero-quantity ones.
    pub fn basic_cells(&self) -> &[(usize, usize)] {
        &self.basic_cells
    }

    /// Final basis, ready to resume the MODI loop from.
    pub fn basis(&self) -> Basis {
        Basis::from_cells(
            self.allocation.rows(),
            self.allocation.cols(),
            self.basic_cells.iter().copied(),
        )
    }

    /// Total cost after the initial allocation, then after every MODI pivot.
    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    /// Checks that the stored plan can be resumed.
    ///
    /// Vectors, matrices and name lists must agree in size, every number must
    /// be finite (and non-negative for supply, demand and costs), basic cells
    /// must lie inside the tableau, and the allocation must ship supply to
    /// demand. Row and column sums may drift by `tol` per unit of total supply.
    ///
    /// # Errors
    ///
    /// A validation error for the first inconsistency found.
    pub fn validate(&self, tol: f64) -> Result<(), TransportError> {
        let rows = self.supply.len();
        let cols = self.demand.len();
        if rows == 0 {
            return Err(TransportError::NoSources);
        }
        if cols == 0 {
            return Err(TransportError::NoDestinations);
        }

        let shapes = [
            ("allocation rows", rows, self.allocation.rows()),
            ("allocation columns", cols, self.allocation.cols()),
            ("allocation buffer", rows * cols, self.allocation.buffer_len()),
            ("cost rows", rows, self.costs.rows()),
            ("cost columns", cols, self.costs.cols()),
            ("cost buffer", rows * cols, self.costs.buffer_len()),
            ("source names", rows, self.source_names.len()),
            ("destination names", cols, self.destination_names.len()),
        ];
        for (what, expected, actual) in shapes {
            if expected != actual {
                return Err(TransportError::SolutionShape {
                    what,
                    expected,
                    actual,
                });
            }
        }

        if let Some((index, &value)) = first_invalid(&self.supply) {
            return Err(TransportError::InvalidSupply { index, value });
        }
        if let Some((index, &value)) = first_invalid(&self.demand) {
            return Err(TransportError::InvalidDemand { index, value });
        }
        for row in 0..rows {
            for col in 0..cols {
                let value = self.costs.get(row, col);
                if !value.is_finite() || value < 0.0 {
                    return Err(TransportError::InvalidCost { row, col, value });
                }
                let value = self.allocation.get(row, col);
                if !value.is_finite() {
                    return Err(TransportError::InvalidQuantity { row, col, value });
                }
            }
        }

        if let Some(&(row, col)) = self
            .basic_cells
            .iter()
            .find(|&&(row, col)| row >= rows || col >= cols)
        {
            return Err(TransportError::BasicCellOutOfRange {
                row,
                col,
                rows,
                cols,
            });
        }

        let scale = self.supply.iter().sum::<f64>().max(1.0);
        let violations =
            check_feasibility(&self.supply, &self.demand, &self.allocation, tol * scale);
        if !violations.is_empty() {
            return Err(TransportError::InfeasibleAllocation {
                violations: violations.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for TransportSolution {
    /// Renders the allocation as a table of `[quantity]/cost` cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.allocation.rows();
        let cols = self.allocation.cols();

        let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows + 2);
        let mut header = vec![String::new()];
        header.extend(self.destination_names.iter().cloned());
        header.push("Supply".to_string());
        cells.push(header);

        for i in 0..rows {
            let mut line = vec![self.source_names[i].clone()];
            for j in 0..cols {
                let q = self.allocation.get(i, j);
                let c = self.costs.get(i, j);
                if q > 0.0 {
                    line.push(format!("[{q}]/{c}"));
                } else {
                    line.push(format!("-/{c}"));
                }
            }
            line.push(format!("{}", self.supply[i]));
            cells.push(line);
        }

        let mut footer = vec!["Demand".to_string()];
        footer.extend(self.demand.iter().map(|d| format!("{d}")));
        footer.push(String::new());
        cells.push(footer);

        let widths: Vec<usize> = (0..cols + 2)
            .map(|k| cells.iter().map(|l| l[k].chars().count()).max().unwrap_or(0))
            .collect();

        for line in &cells {
            let mut first = true;
            for (text, &w) in line.iter().zip(&widths) {
                if !first {
                    f.write_str("  ")?;
                }
                first = false;
                write!(f, "{text:<w$}")?;
            }
            writeln!(f)?;
        }
        write!(f, "Total cost: {}", self.total_cost)
    }
}
