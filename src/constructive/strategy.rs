//! Runtime-selectable initial solution strategy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::CostMatrix;
use crate::models::Allocation;

use super::{least_cost, north_west_corner, vogel_approximation};

/// Method used to build the initial basic feasible solution.
///
/// All variants take the same balanced input and produce an allocation whose
/// row and column sums match supply and demand; they differ only in how
/// close that start is to the optimum.
///
/// # Examples
///
/// ```
/// use u_transport::constructive::InitialStrategy;
/// use u_transport::cost::CostMatrix;
///
/// let costs = CostMatrix::from_rows(&[vec![4.0, 6.0], vec![5.0, 3.0]]).expect("valid");
/// for strategy in InitialStrategy::ALL {
///     let alloc = strategy.build(&[500.0, 400.0], &[300.0, 600.0], &costs, 1e-6);
///     assert!((alloc.row_sum(0) - 500.0).abs() < 1e-9);
/// }
/// assert_eq!(InitialStrategy::default(), InitialStrategy::Vogel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialStrategy {
    /// Vogel's Approximation Method (penalty-driven).
    #[default]
    #[serde(alias = "vam")]
    Vogel,
    /// North-West Corner rule (ignores costs).
    #[serde(alias = "north_west")]
    NorthWestCorner,
    /// Least-Cost (matrix minimum) method.
    LeastCost,
}

impl InitialStrategy {
    /// Every available strategy.
    pub const ALL: [InitialStrategy; 3] = [
        InitialStrategy::Vogel,
        InitialStrategy::NorthWestCorner,
        InitialStrategy::LeastCost,
    ];

    /// Builds an initial allocation for a balanced problem.
    pub fn build(
        &self,
        supply: &[f64],
        demand: &[f64],
        costs: &CostMatrix,
        tol: f64,
    ) -> Allocation {
        match self {
            Self::Vogel => vogel_approximation(supply, demand, costs, tol),
            Self::NorthWestCorner => north_west_corner(supply, demand, costs, tol),
            Self::LeastCost => least_cost(supply, demand, costs, tol),
        }
    }

    /// Short machine-readable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vogel => "vogel",
            Self::NorthWestCorner => "north_west_corner",
            Self::LeastCost => "least_cost",
        }
    }
}

impl fmt::Display for InitialStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vogel => "Vogel's Approximation Method",
            Self::NorthWestCorner => "North-West Corner Method",
            Self::LeastCost => "Least-Cost Method",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_free_functions() {
        let costs = CostMatrix::from_rows(&[
            vec![19.0, 30.0, 50.0, 10.0],
            vec![70.0, 30.0, 40.0, 60.0],
            vec![40.0, 8.0, 70.0, 20.0],
        ])
        .expect("valid");
        let supply = [7.0, 9.0, 18.0];
        let demand = [5.0, 8.0, 7.0, 14.0];
        let nwc = InitialStrategy::NorthWestCorner.build(&supply, &demand, &costs, 1e-6);
        let lcm = InitialStrategy::LeastCost.build(&supply, &demand, &costs, 1e-6);
        let vam = InitialStrategy::Vogel.build(&supply, &demand, &costs, 1e-6);
        assert!((nwc.total_cost(&costs) - 1015.0).abs() < 1e-9);
        assert!((lcm.total_cost(&costs) - 814.0).abs() < 1e-9);
        assert!((vam.total_cost(&costs) - 779.0).abs() < 1e-9);
    }

    #[test]
    fn test_names() {
        assert_eq!(InitialStrategy::Vogel.as_str(), "vogel");
        assert_eq!(
            InitialStrategy::NorthWestCorner.to_string(),
            "North-West Corner Method"
        );
    }

    #[test]
    fn test_serde_aliases() {
        let s: InitialStrategy = serde_json::from_str("\"vam\"").expect("alias");
        assert_eq!(s, InitialStrategy::Vogel);
        let s: InitialStrategy = serde_json::from_str("\"north_west\"").expect("alias");
        assert_eq!(s, InitialStrategy::NorthWestCorner);
        let json = serde_json::to_string(&InitialStrategy::LeastCost).expect("serialize");
        assert_eq!(json, "\"least_cost\"");
    }
}
