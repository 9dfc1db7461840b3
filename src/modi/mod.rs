//! MODI (u-v) optimization of a basic feasible allocation.
//!
//! - [`Basis`] — basic cell set with degeneracy repair
//! - [`Potentials`] — row/column dual values for a basis
//! - [`trace_loop`] — closed loop through an entering cell
//! - [`ModiOptimizer`] — the pivot loop

mod basis;
mod cycle;
mod optimizer;
mod potentials;

pub use basis::Basis;
pub use cycle::trace_loop;
pub use optimizer::{ModiOptimizer, ModiOutcome, ModiState, Pivot};
pub use potentials::Potentials;
