//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::constructive::InitialStrategy;
use crate::error::TransportError;

/// Default numerical tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default iteration budget per tableau cell.
pub const DEFAULT_ITERATION_FACTOR: usize = 10;

/// Smallest iteration cap derived from the factor.
pub const MIN_ITERATIONS: usize = 100;

/// Settings for [`solve`](super::solve).
///
/// # Examples
///
/// ```
/// use u_transport::constructive::InitialStrategy;
/// use u_transport::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_strategy(InitialStrategy::LeastCost)
///     .with_tolerance(1e-9);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.iteration_cap(3, 4), 120);
/// assert_eq!(config.iteration_cap(2, 2), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Initial solution method.
    pub strategy: InitialStrategy,
    /// Run the MODI loop; `false` returns the initial solution as is.
    pub optimize: bool,
    /// Tolerance for balance, positivity, and opportunity-cost sign checks.
    pub tolerance: f64,
    /// Explicit pivot cap, overriding `iteration_factor`.
    pub max_iterations: Option<usize>,
    /// Pivot cap per cell of the balanced tableau.
    pub iteration_factor: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: InitialStrategy::default(),
            optimize: true,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
            iteration_factor: DEFAULT_ITERATION_FACTOR,
        }
    }
}

impl SolverConfig {
    /// Sets the initial solution method.
    pub fn with_strategy(mut self, strategy: InitialStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables the MODI loop.
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Sets the numerical tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets an explicit pivot cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Sets the pivot budget per tableau cell.
    pub fn with_iteration_factor(mut self, factor: usize) -> Self {
        self.iteration_factor = factor;
        self
    }

    /// Pivot cap for a balanced `rows × cols` problem.
    pub fn iteration_cap(&self, rows: usize, cols: usize) -> usize {
        self.max_iterations.unwrap_or_else(|| {
            self.iteration_factor
                .saturating_mul(rows)
                .saturating_mul(cols)
                .max(MIN_ITERATIONS)
        })
    }

    /// Rejects settings the solver cannot work with.
    pub fn validate(&self) -> Result<(), TransportError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(TransportError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.iteration_factor == 0 {
            return Err(TransportError::InvalidConfig(
                "iteration factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
