//! Domain model types for transportation problems.
//!
//! A [`TransportProblem`] is the caller's input; an [`Allocation`] is the
//! live state the solvers mutate; a [`TransportSolution`] with its
//! [`RouteDetail`] list is what comes back.

mod allocation;
mod problem;
mod route;
mod solution;

pub use allocation::Allocation;
pub use problem::TransportProblem;
pub use route::RouteDetail;
pub use solution::{SolveStatus, TransportSolution};
