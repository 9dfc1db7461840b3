//! Dense unit-cost matrix.

use serde::{Deserialize, Serialize};

/// A dense `rows × cols` unit-cost matrix stored in row-major order.
///
/// Row `i` is source `i`, column `j` is destination `j`; `get(i, j)` is the
/// cost of shipping one unit along that route.
///
/// # Examples
///
/// ```
/// use u_transport::cost::CostMatrix;
///
/// let cm = CostMatrix::from_rows(&[vec![4.0, 6.0], vec![5.0, 3.0]]).expect("rectangular");
/// assert_eq!(cm.rows(), 2);
/// assert_eq!(cm.cols(), 2);
/// assert!((cm.get(1, 1) - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl CostMatrix {
    /// Creates a cost matrix of the given shape, initialized to zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates a cost matrix from nested rows.
    ///
    /// Returns `None` if the rows have differing lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let data = rows.iter().flatten().copied().collect();
        Some(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Creates a cost matrix from an explicit row-major buffer.
    ///
    /// Returns `None` if the data length doesn't match `rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { data, rows, cols })
    }

    /// Returns the unit cost from source `row` to destination `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sets the unit cost from source `row` to destination `col`.
    pub fn set(&mut self, row: usize, col: usize, cost: f64) {
        self.data[row * self.cols + col] = cost;
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

    /// Costs of all routes leaving source `row`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns a copy with one extra zero-cost row appended.
    pub fn with_zero_row(&self) -> Self {
        let mut data = self.data.clone();
        data.extend(std::iter::repeat(0.0).take(self.cols));
        Self {
            data,
            rows: self.rows + 1,
            cols: self.cols,
        }
    }

    /// Returns a copy with one extra zero-cost column appended.
    pub fn with_zero_column(&self) -> Self {
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.push(0.0);
        }
        Self {
            data,
            rows: self.rows,
            cols,
        }
    }

    /// Largest unit cost in the matrix, or `None` when empty.
    pub fn max_cost(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Returns the cheapest of the given cells.
    ///
    /// Ties keep the earliest cell in iteration order. Returns `None` if
    /// `cells` is empty.
    pub fn cheapest<I>(&self, cells: I) -> Option<(usize, usize)>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut best: Option<((usize, usize), f64)> = None;
        for (i, j) in cells {
            let c = self.get(i, j);
            match best {
                Some((_, b)) if c >= b => {}
                _ => best = Some(((i, j), c)),
            }
        }
        best.map(|(cell, _)| cell)
    }

    /// Converts back to nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostMatrix {
        CostMatrix::from_rows(&[vec![4.0, 6.0, 8.0], vec![5.0, 3.0, 7.0]]).expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let cm = sample();
        assert_eq!(cm.rows(), 2);
        assert_eq!(cm.cols(), 3);
        assert_eq!(cm.get(0, 2), 8.0);
        assert_eq!(cm.row(1), &[5.0, 3.0, 7.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(CostMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn test_from_data() {
        let cm = CostMatrix::from_data(1, 2, vec![1.0, 2.0]).expect("valid");
        assert_eq!(cm.get(0, 1), 2.0);
        assert!(CostMatrix::from_data(2, 2, vec![1.0]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut cm = CostMatrix::new(2, 2);
        cm.set(1, 0, 9.0);
        assert_eq!(cm.get(1, 0), 9.0);
        assert_eq!(cm.get(0, 1), 0.0);
    }

    #[test]
    fn test_with_zero_row() {
        let cm = sample().with_zero_row();
        assert_eq!(cm.rows(), 3);
        assert_eq!(cm.row(2), &[0.0, 0.0, 0.0]);
        assert_eq!(cm.get(1, 1), 3.0);
    }

    #[test]
    fn test_with_zero_column() {
        let cm = sample().with_zero_column();
        assert_eq!(cm.cols(), 4);
        assert_eq!(cm.row(0), &[4.0, 6.0, 8.0, 0.0]);
        assert_eq!(cm.row(1), &[5.0, 3.0, 7.0, 0.0]);
    }

    #[test]
    fn test_cheapest_keeps_first_tie() {
        let cm = CostMatrix::from_rows(&[vec![2.0, 1.0, 1.0]]).expect("valid");
        assert_eq!(cm.cheapest([(0, 0), (0, 1), (0, 2)]), Some((0, 1)));
        assert_eq!(cm.cheapest(std::iter::empty()), None);
    }

    #[test]
    fn test_max_cost_and_round_trip() {
        let cm = sample();
        assert_eq!(cm.max_cost(), Some(8.0));
        assert_eq!(cm.to_rows(), vec![vec![4.0, 6.0, 8.0], vec![5.0, 3.0, 7.0]]);
        assert_eq!(CostMatrix::new(0, 0).max_cost(), None);
    }
}
