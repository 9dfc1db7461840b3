//! Result assembly and solution self-checks.
//!
//! - [`ResultAssembler`] — final allocation → routes, total cost, flags
//! - [`check_feasibility`] — row/column sums match supply/demand
//! - [`check_optimality`] — no improving route remains for a basis

mod checks;
mod evaluator;

pub use checks::{check_feasibility, check_optimality, Violation};
pub use evaluator::ResultAssembler;
