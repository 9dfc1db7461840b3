//! Interfaces to the neighbouring optimizers of the planning tool.
//!
//! - [`lp`] — linear program shapes and the [`LpSolver`] contract
//! - [`assignment`] — the [`AssignmentSolver`] contract and
//!   [`TransportAssignmentSolver`], which answers it with this crate's solver

pub mod assignment;
pub mod lp;

mod error;

pub use assignment::{AssignmentSolution, AssignmentSolver, TransportAssignmentSolver};
pub use error::PeerError;
pub use lp::{LinearProgram, LpSolution, LpSolver, Sense, VariableBound};
