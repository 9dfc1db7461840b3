//! Result assembler: turns a final allocation into a [`TransportSolution`].

use crate::balance::BalancedProblem;
use crate::constructive::InitialStrategy;
use crate::modi::{ModiOutcome, ModiState};
use crate::models::{Allocation, RouteDetail, TransportSolution};

/// Builds route details and totals for a balanced problem.
///
/// Pure transformation; nothing is recomputed beyond summing costs.
///
/// # Examples
///
/// ```
/// use u_transport::balance::balance;
/// use u_transport::constructive::InitialStrategy;
/// use u_transport::evaluation::ResultAssembler;
/// use u_transport::models::TransportProblem;
/// use u_transport::modi::{Basis, ModiOptimizer};
///
/// let problem = TransportProblem::new(
///     vec![500.0, 400.0],
///     vec![300.0, 600.0],
///     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
/// );
/// let balanced = balance(&problem, 1e-6).expect("valid");
/// let alloc = InitialStrategy::NorthWestCorner.build(
///     balanced.supply(),
///     balanced.demand(),
///     balanced.costs(),
///     1e-6,
/// );
/// let basis = Basis::from_allocation(&alloc, 1e-6);
/// let outcome = ModiOptimizer::new(balanced.costs(), 1e-6, 100)
///     .run(alloc, basis)
///     .expect("consistent");
///
/// let solution = ResultAssembler::new(&balanced, 1e-6)
///     .assemble(outcome, InitialStrategy::NorthWestCorner);
/// assert!(solution.is_optimal());
/// assert!((solution.total_cost() - 3600.0).abs() < 1e-9);
/// assert_eq!(solution.routes().len(), 3);
/// ```
pub struct ResultAssembler<'a> {
    problem: &'a BalancedProblem,
    tol: f64,
}

impl<'a> ResultAssembler<'a> {
    /// Creates an assembler; routes at or below `tol` are omitted.
    pub fn new(problem: &'a BalancedProblem, tol: f64) -> Self {
        Self { problem, tol }
    }

    /// Route details for every cell shipping more than `tol`, row-major.
    pub fn routes(&self, allocation: &Allocation) -> Vec<RouteDetail> {
        let costs = self.problem.costs();
        let sources = self.problem.source_names();
        let destinations = self.problem.destination_names();

        allocation
            .positive_cells(self.tol)
            .map(|(i, j)| {
                RouteDetail::new(
                    i,
                    j,
                    sources[i].as_str(),
                    destinations[j].as_str(),
                    allocation.get(i, j),
                    costs.get(i, j),
                )
                .with_dummy(self.problem.is_dummy_route(i, j))
            })
            .collect()
    }

    /// Assembles the solution for a finished MODI run (or an initial
    /// allocation wrapped as a zero-iteration outcome).
    pub fn assemble(&self, outcome: ModiOutcome, strategy: InitialStrategy) -> TransportSolution {
        let routes = self.routes(&outcome.allocation);
        let total_cost = outcome.allocation.total_cost(self.problem.costs());

        TransportSolution {
            total_cost,
            routes,
            costs: self.problem.costs().clone(),
            supply: self.problem.supply().to_vec(),
            demand: self.problem.demand().to_vec(),
            source_names: self.problem.source_names().to_vec(),
            destination_names: self.problem.destination_names().to_vec(),
            is_optimal: outcome.state == ModiState::Optimal,
            iterations: outcome.iterations,
            strategy,
            balance: self.problem.balance(),
            basic_cells: outcome.basis.cells().collect(),
            cost_history: outcome.cost_history,
            allocation: outcome.allocation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{balance, Balance};
    use crate::models::TransportProblem;
    use crate::modi::Basis;

    fn unbalanced() -> BalancedProblem {
        let problem = TransportProblem::new(
            vec![10.0, 10.0],
            vec![8.0, 8.0, 8.0],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        );
        balance(&problem, 1e-6).expect("valid")
    }

    fn outcome(allocation: Allocation, state: ModiState) -> ModiOutcome {
        let mut basis = Basis::from_allocation(&allocation, 1e-6);
        basis.repair().expect("acyclic");
        ModiOutcome {
            allocation,
            basis,
            iterations: 0,
            state,
            cost_history: vec![0.0],
        }
    }

    #[test]
    fn test_routes_skip_tiny_quantities() {
        let bp = unbalanced();
        let alloc = Allocation::from_rows(&[
            vec![8.0, 2.0, 1e-9],
            vec![0.0, 6.0, 4.0],
            vec![0.0, 0.0, 4.0],
        ])
        .expect("valid");
        let routes = ResultAssembler::new(&bp, 1e-6).routes(&alloc);
        assert_eq!(routes.len(), 5);
        assert_eq!((routes[0].source_index, routes[0].destination_index), (0, 0));
        assert_eq!(routes[0].source, "Source 1");
        assert_eq!(routes[0].destination, "Destination 1");
    }

    #[test]
    fn test_total_cost_counts_every_cell() {
        let bp = unbalanced();
        let alloc = Allocation::from_rows(&[
            vec![8.0, 2.0, 1e-9],
            vec![0.0, 6.0, 4.0 - 1e-9],
            vec![0.0, 0.0, 4.0],
        ])
        .expect("valid");
        let mut out = outcome(alloc, ModiState::Optimal);
        out.cost_history = vec![out.allocation.total_cost(bp.costs())];
        let sol = ResultAssembler::new(&bp, 1e-6).assemble(out, InitialStrategy::Vogel);

        // The 1e-9 on (0, 2) has no route but still costs 3e-9.
        assert_eq!(sol.routes().len(), 5);
        assert_eq!(sol.cost_history().last().copied(), Some(sol.total_cost()));
        let route_sum: f64 = sol.routes().iter().map(|r| r.route_cost).sum();
        assert!((sol.total_cost() - route_sum).abs() < 1e-7);
    }

    #[test]
    fn test_dummy_routes_flagged_and_free() {
        let bp = unbalanced();
        let alloc = Allocation::from_rows(&[
            vec![8.0, 2.0, 0.0],
            vec![0.0, 6.0, 4.0],
            vec![0.0, 0.0, 4.0],
        ])
        .expect("valid");
        let sol = ResultAssembler::new(&bp, 1e-6)
            .assemble(outcome(alloc, ModiState::Optimal), InitialStrategy::Vogel);

        assert_eq!(sol.balance(), Balance::DummySource { quantity: 4.0 });
        let dummy: Vec<_> = sol.routes().iter().filter(|r| r.is_dummy).collect();
        assert_eq!(dummy.len(), 1);
        assert_eq!(dummy[0].source, "Dummy Source");
        assert_eq!(dummy[0].route_cost, 0.0);
        assert_eq!(sol.active_routes().count(), 4);
        // 8·1 + 2·2 + 6·5 + 4·6
        assert!((sol.total_cost() - 66.0).abs() < 1e-9);
        assert_eq!(sol.total_supply(), 20.0);
        assert_eq!(sol.total_demand(), 24.0);
    }

    #[test]
    fn test_improving_state_not_optimal() {
        let bp = unbalanced();
        let alloc = InitialStrategy::NorthWestCorner.build(bp.supply(), bp.demand(), bp.costs(), 1e-6);
        let sol = ResultAssembler::new(&bp, 1e-6)
            .assemble(outcome(alloc, ModiState::Improving), InitialStrategy::NorthWestCorner);
        assert!(!sol.is_optimal());
        assert_eq!(sol.strategy(), InitialStrategy::NorthWestCorner);
        assert_eq!(sol.basic_cells().len(), 5);
    }
}
