//! # u-transport
//!
//! Transportation problem optimization: ship goods from supply points to
//! demand points at minimum total cost, meeting every supply and demand
//! exactly.
//!
//! ## Pipeline
//!
//! 1. [`balance`] — pad unequal totals with a zero-cost synthetic node
//! 2. [`constructive`] — initial basic feasible solution (Vogel, North-West Corner, Least-Cost)
//! 3. [`modi`] — MODI (u-v) pivoting with degeneracy repair until no route improves
//! 4. [`evaluation`] — route details, totals, and self-checks
//!
//! ## Modules
//!
//! - [`models`] — Problem, allocation, route detail, and solution types
//! - [`cost`] — Dense unit cost matrix
//! - [`solver`] — [`solve`](solver::solve), [`reoptimize`](solver::reoptimize), configuration, request/response
//! - [`error`] — Error taxonomy (validation, internal, non-convergence)
//! - [`peers`] — LP and assignment solver contracts, plus an assignment adapter
//!
//! ## Example
//!
//! ```
//! use u_transport::models::TransportProblem;
//! use u_transport::solver::{solve, SolverConfig};
//!
//! let problem = TransportProblem::new(
//!     vec![7.0, 9.0, 18.0],
//!     vec![5.0, 8.0, 7.0, 14.0],
//!     vec![
//!         vec![19.0, 30.0, 50.0, 10.0],
//!         vec![70.0, 30.0, 40.0, 60.0],
//!         vec![40.0, 8.0, 70.0, 20.0],
//!     ],
//! );
//! let solution = solve(&problem, &SolverConfig::default()).expect("solvable");
//! assert!(solution.is_optimal());
//! assert!((solution.total_cost() - 743.0).abs() < 1e-9);
//! ```

pub mod balance;
pub mod constructive;
pub mod cost;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod modi;
pub mod peers;
pub mod solver;

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "wasm")]
pub mod wasm;
