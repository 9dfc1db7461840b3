//! End-to-end solve pipeline.
//!
//! - [`solve`] — validate, balance, build an initial solution, run MODI, assemble
//! - [`reoptimize`] — resume MODI from a previous solution
//! - [`SolverConfig`] — strategy, tolerance, iteration cap
//! - [`TransportRequest`] / [`TransportResponse`] — flat shapes for bindings

mod config;
mod pipeline;
mod request;

pub use config::{SolverConfig, DEFAULT_ITERATION_FACTOR, DEFAULT_TOLERANCE, MIN_ITERATIONS};
pub use pipeline::{reoptimize, solve};
pub use request::{TransportRequest, TransportResponse};
