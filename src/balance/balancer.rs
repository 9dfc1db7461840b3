//! Balancer implementation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::CostMatrix;
use crate::error::TransportError;
use crate::models::TransportProblem;

/// Display name of a synthetic source.
pub const DUMMY_SOURCE: &str = "Dummy Source";

/// Display name of a synthetic destination.
pub const DUMMY_DESTINATION: &str = "Dummy Destination";

/// How a problem was balanced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Balance {
    /// Totals already matched.
    Balanced,
    /// Demand exceeded supply; a zero-cost source supplies the shortfall.
    DummySource {
        /// Unmet demand absorbed by the synthetic source.
        quantity: f64,
    },
    /// Supply exceeded demand; a zero-cost destination takes the excess.
    DummyDestination {
        /// Unshipped supply absorbed by the synthetic destination.
        quantity: f64,
    },
}

/// A balanced problem: `total supply == total demand` within tolerance.
///
/// Owns its (possibly extended) vectors and cost matrix for the duration of
/// a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedProblem {
    supply: Vec<f64>,
    demand: Vec<f64>,
    costs: CostMatrix,
    source_names: Vec<String>,
    destination_names: Vec<String>,
    balance: Balance,
}

impl BalancedProblem {
    /// Rebuilds a balanced problem from a previous solve's data.
    pub(crate) fn from_parts(
        supply: Vec<f64>,
        demand: Vec<f64>,
        costs: CostMatrix,
        source_names: Vec<String>,
        destination_names: Vec<String>,
        balance: Balance,
    ) -> Self {
        Self {
            supply,
            demand,
            costs,
            source_names,
            destination_names,
            balance,
        }
    }

    /// Supply per source, including any synthetic source.
    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    /// Demand per destination, including any synthetic destination.
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    /// Unit costs, including zero-cost synthetic routes.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Source display names.
    pub fn source_names(&self) -> &[String] {
        &self.source_names
    }

    /// Destination display names.
    pub fn destination_names(&self) -> &[String] {
        &self.destination_names
    }

    /// What the balancer did.
    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Number of rows after balancing.
    pub fn rows(&self) -> usize {
        self.supply.len()
    }

    /// Number of columns after balancing.
    pub fn cols(&self) -> usize {
        self.demand.len()
    }

    /// Returns `true` if route `(row, col)` touches the synthetic node.
    pub fn is_dummy_route(&self, row: usize, col: usize) -> bool {
        match self.balance {
            Balance::Balanced => false,
            Balance::DummySource { .. } => row + 1 == self.rows(),
            Balance::DummyDestination { .. } => col + 1 == self.cols(),
        }
    }
}

/// Validates `problem` and appends a synthetic node if its totals differ by more than `tol`.
///
/// # Examples
///
/// ```
/// use u_transport::balance::{balance, Balance};
/// use u_transport::models::TransportProblem;
///
/// let problem = TransportProblem::new(
///     vec![10.0, 10.0],
///     vec![8.0, 8.0, 8.0],
///     vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
/// );
/// let balanced = balance(&problem, 1e-6).expect("valid");
/// assert_eq!(balanced.balance(), Balance::DummySource { quantity: 4.0 });
/// assert_eq!(balanced.supply(), &[10.0, 10.0, 4.0]);
/// assert_eq!(balanced.costs().row(2), &[0.0, 0.0, 0.0]);
/// ```
pub fn balance(problem: &TransportProblem, tol: f64) -> Result<BalancedProblem, TransportError> {
    let costs = problem.cost_matrix()?;
    let mut supply = problem.supply().to_vec();
    let mut demand = problem.demand().to_vec();
    let mut source_names = problem.source_names();
    let mut destination_names = problem.destination_names();

    let total_supply = problem.total_supply();
    let total_demand = problem.total_demand();
    let diff = total_supply - total_demand;

    let (costs, balance) = if diff.abs() <= tol {
        (costs, Balance::Balanced)
    } else if diff > 0.0 {
        debug!(excess = diff, "appending dummy destination");
        demand.push(diff);
        destination_names.push(DUMMY_DESTINATION.to_string());
        (
            costs.with_zero_column(),
            Balance::DummyDestination { quantity: diff },
        )
    } else {
        debug!(shortfall = -diff, "appending dummy source");
        supply.push(-diff);
        source_names.push(DUMMY_SOURCE.to_string());
        (costs.with_zero_row(), Balance::DummySource { quantity: -diff })
    };

    Ok(BalancedProblem {
        supply,
        demand,
        costs,
        source_names,
        destination_names,
        balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_balanced() {
        let p = TransportProblem::new(
            vec![500.0, 400.0],
            vec![300.0, 600.0],
            vec![vec![4.0, 6.0], vec![5.0, 3.0]],
        );
        let b = balance(&p, 1e-6).expect("valid");
        assert_eq!(b.balance(), Balance::Balanced);
        assert_eq!(b.supply(), p.supply());
        assert_eq!(b.demand(), p.demand());
        assert_eq!(b.costs().to_rows(), p.costs().to_vec());
        assert!(!b.is_dummy_route(1, 1));
    }

    #[test]
    fn test_excess_supply_adds_destination() {
        let p = TransportProblem::new(vec![30.0, 20.0], vec![25.0], vec![vec![2.0], vec![3.0]]);
        let b = balance(&p, 1e-6).expect("valid");
        assert_eq!(b.balance(), Balance::DummyDestination { quantity: 25.0 });
        assert_eq!(b.demand(), &[25.0, 25.0]);
        assert_eq!(b.cols(), 2);
        assert_eq!(b.costs().get(1, 1), 0.0);
        assert_eq!(b.destination_names()[1], DUMMY_DESTINATION);
        assert!(b.is_dummy_route(0, 1));
        assert!(!b.is_dummy_route(0, 0));
    }

    #[test]
    fn test_excess_demand_adds_source() {
        let p = TransportProblem::new(
            vec![10.0, 10.0],
            vec![8.0, 8.0, 8.0],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        );
        let b = balance(&p, 1e-6).expect("valid");
        assert_eq!(b.balance(), Balance::DummySource { quantity: 4.0 });
        assert_eq!(b.rows(), 3);
        assert_eq!(b.source_names()[2], DUMMY_SOURCE);
        assert!(b.is_dummy_route(2, 0));
        let total_supply: f64 = b.supply().iter().sum();
        let total_demand: f64 = b.demand().iter().sum();
        assert!((total_supply - total_demand).abs() < 1e-9);
    }

    #[test]
    fn test_within_tolerance_is_unchanged() {
        let p = TransportProblem::new(vec![10.0], vec![10.0 + 1e-9], vec![vec![1.0]]);
        let b = balance(&p, 1e-6).expect("valid");
        assert_eq!(b.balance(), Balance::Balanced);
        assert_eq!(b.rows(), 1);
        assert_eq!(b.cols(), 1);
    }

    #[test]
    fn test_invalid_problem_rejected() {
        let p = TransportProblem::new(vec![1.0], vec![1.0], vec![vec![-1.0]]);
        assert!(matches!(
            balance(&p, 1e-6),
            Err(TransportError::InvalidCost { .. })
        ));
    }
}
