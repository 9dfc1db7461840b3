//! Transportation problem definition.

use serde::{Deserialize, Serialize};

use crate::cost::CostMatrix;
use crate::error::TransportError;

fn default_name() -> String {
    "Untitled Transportation Problem".to_string()
}

/// A transportation problem instance as supplied by the caller.
///
/// Holds the raw supply and demand vectors and the nested cost rows. Nothing
/// is checked at construction; [`validate`](Self::validate) runs before any
/// solve, so malformed input can still be represented and reported.
///
/// # Examples
///
/// ```
/// use u_transport::models::TransportProblem;
///
/// let problem = TransportProblem::new(
///     vec![500.0, 400.0],
///     vec![300.0, 600.0],
///     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
/// )
/// .with_source_names(vec!["Karachi".into(), "Lahore".into()]);
///
/// assert!(problem.validate().is_ok());
/// assert!(problem.is_balanced(1e-6));
/// assert_eq!(problem.source_name(1), "Lahore");
/// assert_eq!(problem.destination_name(0), "Destination 1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportProblem {
    supply: Vec<f64>,
    demand: Vec<f64>,
    costs: Vec<Vec<f64>>,
    #[serde(default)]
    source_names: Option<Vec<String>>,
    #[serde(default)]
    destination_names: Option<Vec<String>>,
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    description: String,
}

impl TransportProblem {
    /// Creates a problem from supply, demand, and `supply.len() × demand.len()` cost rows.
    pub fn new(supply: Vec<f64>, demand: Vec<f64>, costs: Vec<Vec<f64>>) -> Self {
        Self {
            supply,
            demand,
            costs,
            source_names: None,
            destination_names: None,
            name: default_name(),
            description: String::new(),
        }
    }

    /// Sets display names for the sources.
    pub fn with_source_names(mut self, names: Vec<String>) -> Self {
        self.source_names = Some(names);
        self
    }

    /// Sets display names for the destinations.
    pub fn with_destination_names(mut self, names: Vec<String>) -> Self {
        self.destination_names = Some(names);
        self
    }

    /// Sets the problem name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a free-form description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Supply quantity at each source.
    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    /// Demand quantity at each destination.
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    /// Unit cost rows (one per source).
    pub fn costs(&self) -> &[Vec<f64>] {
        &self.costs
    }

    /// Problem name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Problem description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of sources.
    pub fn num_sources(&self) -> usize {
        self.supply.len()
    }

    /// Number of destinations.
    pub fn num_destinations(&self) -> usize {
        self.demand.len()
    }

    /// Sum of all supply.
    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    /// Sum of all demand.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Returns `true` if total supply equals total demand within `tol`.
    pub fn is_balanced(&self, tol: f64) -> bool {
        (self.total_supply() - self.total_demand()).abs() <= tol
    }

    /// Display name of source `i`, defaulting to `Source {i+1}`.
    pub fn source_name(&self, i: usize) -> String {
        self.source_names
            .as_ref()
            .and_then(|names| names.get(i).cloned())
            .unwrap_or_else(|| format!("Source {}", i + 1))
    }

    /// Display name of destination `j`, defaulting to `Destination {j+1}`.
    pub fn destination_name(&self, j: usize) -> String {
        self.destination_names
            .as_ref()
            .and_then(|names| names.get(j).cloned())
            .unwrap_or_else(|| format!("Destination {}", j + 1))
    }

    /// Display names of all sources.
    pub fn source_names(&self) -> Vec<String> {
        (0..self.num_sources()).map(|i| self.source_name(i)).collect()
    }

    /// Display names of all destinations.
    pub fn destination_names(&self) -> Vec<String> {
        (0..self.num_destinations())
            .map(|j| self.destination_name(j))
            .collect()
    }

    /// Checks dimensions, signs, and name lists.
    ///
    /// Returns the first problem found, scanning shape before values.
    pub fn validate(&self) -> Result<(), TransportError> {
        let m = self.supply.len();
        let n = self.demand.len();
        if m == 0 {
            return Err(TransportError::NoSources);
        }
        if n == 0 {
            return Err(TransportError::NoDestinations);
        }
        if self.costs.len() != m {
            return Err(TransportError::RowCountMismatch {
                expected: m,
                actual: self.costs.len(),
            });
        }
        for (row, r) in self.costs.iter().enumerate() {
            if r.len() != n {
                return Err(TransportError::ColumnCountMismatch {
                    row,
                    expected: n,
                    actual: r.len(),
                });
            }
        }

        if let Some((index, &value)) = first_invalid(&self.supply) {
            return Err(TransportError::InvalidSupply { index, value });
        }
        if let Some((index, &value)) = first_invalid(&self.demand) {
            return Err(TransportError::InvalidDemand { index, value });
        }
        for (row, r) in self.costs.iter().enumerate() {
            if let Some((col, &value)) = first_invalid(r) {
                return Err(TransportError::InvalidCost { row, col, value });
            }
        }
        let total = self.total_supply();
        if !total.is_finite() {
            return Err(TransportError::NonFiniteTotal {
                what: "supply",
                value: total,
            });
        }
        let total = self.total_demand();
        if !total.is_finite() {
            return Err(TransportError::NonFiniteTotal {
                what: "demand",
                value: total,
            });
        }

        if let Some(names) = &self.source_names {
            if names.len() != m {
                return Err(TransportError::NameCountMismatch {
                    what: "source list",
                    expected: m,
                    actual: names.len(),
                });
            }
        }
        if let Some(names) = &self.destination_names {
            if names.len() != n {
                return Err(TransportError::NameCountMismatch {
                    what: "destination list",
                    expected: n,
                    actual: names.len(),
                });
            }
        }
        Ok(())
    }

    /// Builds the dense cost matrix.
    ///
    /// Fails with the same error as [`validate`](Self::validate) on ragged rows.
    pub fn cost_matrix(&self) -> Result<CostMatrix, TransportError> {
        self.validate()?;
        CostMatrix::from_rows(&self.costs).ok_or(TransportError::RowCountMismatch {
            expected: self.supply.len(),
            actual: self.costs.len(),
        })
    }
}

pub(crate) fn first_invalid(values: &[f64]) -> Option<(usize, &f64)> {
    values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
}
