//! Balance → initial solution → MODI → assemble.

use tracing::{debug, info, warn};

use crate::balance::{balance, BalancedProblem};
use crate::error::{SolveError, TransportError};
use crate::evaluation::ResultAssembler;
use crate::models::{Allocation, TransportProblem, TransportSolution};
use crate::modi::{Basis, ModiOptimizer, ModiOutcome, ModiState};

use super::SolverConfig;

/// Solves a transportation problem.
///
/// Validates the input, balances totals, builds an initial allocation with
/// the configured strategy, and (unless `optimize` is off) runs the MODI loop
/// to a certified optimum.
///
/// # Errors
///
/// - Validation errors for malformed problems or configuration; no work is done.
/// - Internal errors if the basic cell set ever stops being a spanning tree.
/// - Non-convergence if the iteration cap is hit; [`SolveError::best`] then
///   holds the allocation reached so far.
///
/// # Examples
///
/// ```
/// use u_transport::models::TransportProblem;
/// use u_transport::solver::{solve, SolverConfig};
///
/// let problem = TransportProblem::new(
///     vec![500.0, 400.0],
///     vec![300.0, 600.0],
///     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
/// );
/// let solution = solve(&problem, &SolverConfig::default()).expect("solvable");
/// assert!(solution.is_optimal());
/// assert!((solution.total_cost() - 3600.0).abs() < 1e-9);
/// ```
pub fn solve(
    problem: &TransportProblem,
    config: &SolverConfig,
) -> Result<TransportSolution, SolveError> {
    config.validate()?;
    let tol = config.tolerance;
    let balanced = balance(problem, tol)?;

    info!(
        problem = problem.name(),
        sources = balanced.rows(),
        destinations = balanced.cols(),
        strategy = config.strategy.as_str(),
        "solving transportation problem"
    );

    let allocation = config
        .strategy
        .build(balanced.supply(), balanced.demand(), balanced.costs(), tol);
    let mut basis = Basis::from_allocation(&allocation, tol);
    basis.repair()?;

    if !config.optimize {
        let cost = allocation.total_cost(balanced.costs());
        let outcome = ModiOutcome {
            allocation,
            basis,
            iterations: 0,
            state: ModiState::Improving,
            cost_history: vec![cost],
        };
        let solution = ResultAssembler::new(&balanced, tol).assemble(outcome, config.strategy);
        info!(total_cost = solution.total_cost(), "initial solution built");
        return Ok(solution);
    }

    optimize(&balanced, allocation, basis, config)
}

/// Resumes the MODI loop from a previous solution's allocation and basis.
///
/// An optimal solution comes back unchanged in zero iterations. If the
/// stored basic cells leave a route with flow out, the basis is rebuilt from
/// the allocation.
///
/// # Errors
///
/// - Validation errors if the solution is inconsistent (see
///   [`TransportSolution::validate`]) or its routes with flow contain a cycle.
/// - Non-convergence as for [`solve`].
///
/// # Examples
///
/// ```
/// use u_transport::constructive::InitialStrategy;
/// use u_transport::models::TransportProblem;
/// use u_transport::solver::{reoptimize, solve, SolverConfig};
///
/// let problem = TransportProblem::new(
///     vec![7.0, 9.0, 18.0],
///     vec![5.0, 8.0, 7.0, 14.0],
///     vec![
///         vec![19.0, 30.0, 50.0, 10.0],
///         vec![70.0, 30.0, 40.0, 60.0],
///         vec![40.0, 8.0, 70.0, 20.0],
///     ],
/// );
/// let config = SolverConfig::default()
///     .with_strategy(InitialStrategy::NorthWestCorner)
///     .with_optimize(false);
/// let initial = solve(&problem, &config).expect("solvable");
/// assert!(!initial.is_optimal());
///
/// let optimal = reoptimize(&initial, &config.with_optimize(true)).expect("converges");
/// assert!((optimal.total_cost() - 743.0).abs() < 1e-9);
///
/// let again = reoptimize(&optimal, &SolverConfig::default()).expect("converges");
/// assert_eq!(again.iterations(), 0);
/// assert_eq!(again.total_cost(), optimal.total_cost());
/// ```
pub fn reoptimize(
    solution: &TransportSolution,
    config: &SolverConfig,
) -> Result<TransportSolution, SolveError> {
    config.validate()?;
    solution.validate(config.tolerance)?;
    let balanced = BalancedProblem::from_parts(
        solution.supply().to_vec(),
        solution.demand().to_vec(),
        solution.costs().clone(),
        solution.source_names().to_vec(),
        solution.destination_names().to_vec(),
        solution.balance(),
    );
    let basis = resume_basis(solution, config.tolerance)?;

    let mut resumed = optimize(
        &balanced,
        solution.allocation().clone(),
        basis,
        config,
    )?;
    resumed.strategy = solution.strategy();
    Ok(resumed)
}

/// The stored basis if it holds every route with flow, otherwise one rebuilt
/// from the allocation.
fn resume_basis(solution: &TransportSolution, tol: f64) -> Result<Basis, TransportError> {
    let allocation = solution.allocation();
    let mut basis = solution.basis();
    if allocation
        .positive_cells(tol)
        .all(|(i, j)| basis.contains(i, j))
        && basis.repair().is_ok()
    {
        return Ok(basis);
    }

    debug!("stored basis does not cover the allocation; rebuilding");
    let mut basis = Basis::from_allocation(allocation, tol);
    basis.repair().map_err(|e| match e {
        TransportError::CyclicBasis { row, col } => {
            TransportError::NonBasicAllocation { row, col }
        }
        other => other,
    })?;
    Ok(basis)
}

fn optimize(
    balanced: &BalancedProblem,
    allocation: Allocation,
    basis: Basis,
    config: &SolverConfig,
) -> Result<TransportSolution, SolveError> {
    let tol = config.tolerance;
    let cap = config.iteration_cap(balanced.rows(), balanced.cols());
    let outcome = ModiOptimizer::new(balanced.costs(), tol, cap).run(allocation, basis)?;

    let state = outcome.state;
    let iterations = outcome.iterations;
    let solution = ResultAssembler::new(balanced, tol).assemble(outcome, config.strategy);

    if state == ModiState::Improving {
        warn!(
            iterations,
            total_cost = solution.total_cost(),
            "iteration cap reached; returning best allocation found"
        );
        return Err(SolveError::with_best(
            TransportError::NotConverged { iterations },
            solution,
        ));
    }

    info!(
        total_cost = solution.total_cost(),
        iterations, "optimal solution found"
    );
    Ok(solution)
}
