//! Flat request/response shapes for bindings and JSON callers.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, SolveError};
use crate::models::{RouteDetail, TransportProblem, TransportSolution};

use super::{solve, SolverConfig};

/// A problem plus solver settings.
///
/// Serializes flat: the problem's fields sit at the top level next to an
/// optional `config` object.
///
/// # Examples
///
/// ```
/// use u_transport::solver::TransportRequest;
///
/// let json = r#"{
///     "supply": [500, 400],
///     "demand": [300, 600],
///     "costs": [[4, 6], [5, 3]],
///     "config": { "strategy": "least_cost" }
/// }"#;
/// let request: TransportRequest = serde_json::from_str(json).expect("valid json");
/// let response = request.solve();
/// assert!(response.success);
/// assert_eq!(response.total_cost, 3600.0);
/// assert_eq!(response.initial_method.as_deref(), Some("Least-Cost Method"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRequest {
    /// The problem to solve.
    #[serde(flatten)]
    pub problem: TransportProblem,
    /// Solver settings; defaults apply when omitted.
    #[serde(default)]
    pub config: SolverConfig,
}

impl TransportRequest {
    /// Creates a request.
    pub fn new(problem: TransportProblem, config: SolverConfig) -> Self {
        Self { problem, config }
    }

    /// Solves the request; never fails, errors are reported in the response.
    pub fn solve(&self) -> TransportResponse {
        solve(&self.problem, &self.config).into()
    }
}

/// Outcome of a solve as a single flat record.
///
/// On failure `success` is `false`, `message` describes the error and
/// `error_kind` classifies it. A non-converged solve still fills the payload
/// with the best allocation reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// `true` if a solution was produced without error.
    pub success: bool,
    /// Status or error message.
    pub message: String,
    /// Total shipping cost.
    pub total_cost: f64,
    /// Allocation rows (balanced dimensions).
    pub allocation: Vec<Vec<f64>>,
    /// Routes with positive quantity.
    pub routes: Vec<RouteDetail>,
    /// `true` if optimality was certified.
    pub is_optimal: bool,
    /// MODI iterations performed.
    pub iterations: usize,
    /// Display name of the initial solution strategy.
    pub initial_method: Option<String>,
    /// Error category on failure.
    pub error_kind: Option<ErrorKind>,
}

impl TransportResponse {
    fn from_solution(solution: &TransportSolution, success: bool, message: String) -> Self {
        Self {
            success,
            message,
            total_cost: solution.total_cost(),
            allocation: solution.allocation().to_rows(),
            routes: solution.routes().to_vec(),
            is_optimal: solution.is_optimal(),
            iterations: solution.iterations(),
            initial_method: Some(solution.strategy().to_string()),
            error_kind: None,
        }
    }

    fn from_error(err: &SolveError) -> Self {
        let message = err.to_string();
        let mut response = match err.best() {
            Some(best) => Self::from_solution(best, false, message),
            None => Self {
                success: false,
                message,
                total_cost: 0.0,
                allocation: Vec::new(),
                routes: Vec::new(),
                is_optimal: false,
                iterations: 0,
                initial_method: None,
                error_kind: None,
            },
        };
        response.error_kind = Some(err.kind());
        response
    }
}

impl From<Result<TransportSolution, SolveError>> for TransportResponse {
    fn from(result: Result<TransportSolution, SolveError>) -> Self {
        match result {
            Ok(solution) => {
                let message = solution.message().to_string();
                Self::from_solution(&solution, true, message)
            }
            Err(err) => Self::from_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::InitialStrategy;

    fn textbook() -> TransportProblem {
        TransportProblem::new(
            vec![7.0, 9.0, 18.0],
            vec![5.0, 8.0, 7.0, 14.0],
            vec![
                vec![19.0, 30.0, 50.0, 10.0],
                vec![70.0, 30.0, 40.0, 60.0],
                vec![40.0, 8.0, 70.0, 20.0],
            ],
        )
    }

    #[test]
    fn test_success_response() {
        let resp = TransportRequest::new(textbook(), SolverConfig::default()).solve();
        assert!(resp.success);
        assert_eq!(resp.message, "Optimal solution found");
        assert!((resp.total_cost - 743.0).abs() < 1e-9);
        assert!(resp.is_optimal);
        assert_eq!(resp.allocation.len(), 3);
        assert_eq!(
            resp.initial_method.as_deref(),
            Some("Vogel's Approximation Method")
        );
        assert_eq!(resp.error_kind, None);
    }

    #[test]
    fn test_validation_response() {
        let bad = TransportProblem::new(vec![1.0, 2.0], vec![3.0], vec![vec![1.0]]);
        let resp = TransportRequest::new(bad, SolverConfig::default()).solve();
        assert!(!resp.success);
        assert_eq!(resp.error_kind, Some(ErrorKind::Validation));
        assert!(resp.allocation.is_empty());
        assert!(resp.initial_method.is_none());
    }

    #[test]
    fn test_non_convergence_response_keeps_payload() {
        let config = SolverConfig::default()
            .with_strategy(InitialStrategy::NorthWestCorner)
            .with_max_iterations(1);
        let resp = TransportRequest::new(textbook(), config).solve();
        assert!(!resp.success);
        assert_eq!(resp.error_kind, Some(ErrorKind::NonConvergence));
        assert!(resp.message.contains("did not reach certified optimum"));
        assert_eq!(resp.iterations, 1);
        assert!(!resp.routes.is_empty());
    }

    #[test]
    fn test_request_json_roundtrip() {
        let req = TransportRequest::new(
            textbook().with_name("Plants"),
            SolverConfig::default().with_strategy(InitialStrategy::LeastCost),
        );
        let json = serde_json::to_string(&req).expect("serialize");
        let back: TransportRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, req);
    }
}
