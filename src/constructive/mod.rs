//! Initial basic feasible solutions for balanced transportation problems.
//!
//! - [`north_west_corner`] — North-West Corner rule, O(m + n)
//! - [`least_cost`] — Least-Cost (matrix minimum) method, O((m + n)·m·n)
//! - [`vogel_approximation`] — Vogel's Approximation Method (Reinfeld & Vogel, 1958)
//! - [`InitialStrategy`] — runtime selection among the three

mod ledger;
mod least_cost;
mod north_west;
mod strategy;
mod vogel;

pub use least_cost::least_cost;
pub use north_west::north_west_corner;
pub use strategy::InitialStrategy;
pub use vogel::vogel_approximation;
