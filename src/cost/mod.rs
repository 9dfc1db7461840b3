//! Dense unit-cost matrix.

mod matrix;

pub use matrix::CostMatrix;
