//! Allocation matrix: shipped quantity per route.

use serde::{Deserialize, Serialize};

use crate::cost::CostMatrix;

/// Quantities shipped from each source to each destination.
///
/// Same row-major layout as [`CostMatrix`]. The shape is fixed at creation;
/// solvers only ever mutate cells in place.
///
/// # Examples
///
/// ```
/// use u_transport::models::Allocation;
/// use u_transport::cost::CostMatrix;
///
/// let mut alloc = Allocation::new(2, 2);
/// alloc.set(0, 0, 300.0);
/// alloc.set(0, 1, 200.0);
/// alloc.set(1, 1, 400.0);
///
/// let costs = CostMatrix::from_rows(&[vec![4.0, 6.0], vec![5.0, 3.0]]).expect("valid");
/// assert!((alloc.total_cost(&costs) - 3600.0).abs() < 1e-10);
/// assert!((alloc.row_sum(0) - 500.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Allocation {
    /// Creates an empty (all-zero) allocation.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an allocation from nested rows.
    ///
    /// Returns `None` if the rows have differing lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            rows: rows.len(),
            cols,
        })
    }

    /// Quantity shipped on route `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Overwrites the quantity on route `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, quantity: f64) {
        self.data[row * self.cols + col] = quantity;
    }

    /// Adds `delta` (possibly negative) to route `(row, col)`.
    pub fn add(&mut self, row: usize, col: usize, delta: f64) {
        self.data[row * self.cols + col] += delta;
    }

    /// Length of the row-major buffer.
    ///
    /// Equals `rows * cols` for values built through the constructors; a
    /// deserialized value may disagree.
    pub(crate) fn buffer_len(&self) -> usize {
        self.data.len()
    }

    /// Number of sources.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of destinations.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total shipped out of source `row`.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.data[row * self.cols..(row + 1) * self.cols].iter().sum()
    }

    /// Total shipped into destination `col`.
    pub fn col_sum(&self, col: usize) -> f64 {
        (0..self.rows).map(|i| self.get(i, col)).sum()
    }

    /// Sum of quantity × unit cost over every route.
    pub fn total_cost(&self, costs: &CostMatrix) -> f64 {
        let mut total = 0.0;
        for i in 0..self.rows {
            for j in 0..self.cols {
                total += self.get(i, j) * costs.get(i, j);
            }
        }
        total
    }

    /// Cells whose quantity exceeds `tol`, in row-major order.
    pub fn positive_cells(&self, tol: f64) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(move |(_, &q)| q > tol)
            .map(move |(k, _)| (k / cols, k % cols))
    }

    /// Converts to nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }
}
