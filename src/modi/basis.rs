//! Basic cell set and degeneracy repair.

use tracing::debug;

use crate::error::TransportError;
use crate::models::Allocation;

/// The set of basic cells of a transportation tableau.
///
/// Viewing rows and columns as the `m + n` nodes of a bipartite graph and
/// basic cells as edges, a valid basis is a spanning tree: exactly
/// `m + n - 1` cells, connected and acyclic. Cells may be basic at zero
/// quantity when the allocation is degenerate.
///
/// # Examples
///
/// ```
/// use u_transport::modi::Basis;
///
/// // Degenerate: two cells where a 2×2 tree needs three.
/// let mut basis = Basis::from_cells(2, 2, [(0, 0), (1, 1)]);
/// assert!(!basis.is_spanning_tree());
///
/// let padded = basis.repair().expect("acyclic");
/// assert_eq!(padded, 1);
/// assert!(basis.contains(0, 1));
/// assert!(basis.is_spanning_tree());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    rows: usize,
    cols: usize,
    basic: Vec<bool>,
    len: usize,
}

impl Basis {
    /// Creates an empty basis for an `rows × cols` tableau.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            basic: vec![false; rows * cols],
            len: 0,
        }
    }

    /// Creates a basis containing the given cells.
    pub fn from_cells<I>(rows: usize, cols: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut basis = Self::new(rows, cols);
        for (i, j) in cells {
            basis.insert(i, j);
        }
        basis
    }

    /// Creates a basis from the cells of `allocation` holding more than `tol`.
    ///
    /// The result is usually degenerate; call [`repair`](Self::repair) before use.
    pub fn from_allocation(allocation: &Allocation, tol: f64) -> Self {
        Self::from_cells(
            allocation.rows(),
            allocation.cols(),
            allocation.positive_cells(tol),
        )
    }

    /// Number of rows in the tableau.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the tableau.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of basic cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no cell is basic.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of a spanning tree: `rows + cols - 1`.
    pub fn required(&self) -> usize {
        (self.rows + self.cols).saturating_sub(1)
    }

    /// Returns `true` if `(row, col)` is basic.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.basic[row * self.cols + col]
    }

    /// Marks `(row, col)` basic. Returns `false` if it already was.
    pub fn insert(&mut self, row: usize, col: usize) -> bool {
        let slot = &mut self.basic[row * self.cols + col];
        if *slot {
            return false;
        }
        *slot = true;
        self.len += 1;
        true
    }

    /// Marks `(row, col)` non-basic. Returns `false` if it wasn't basic.
    pub fn remove(&mut self, row: usize, col: usize) -> bool {
        let slot = &mut self.basic[row * self.cols + col];
        if !*slot {
            return false;
        }
        *slot = false;
        self.len -= 1;
        true
    }

    /// Basic cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.basic
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(k, _)| (k / cols, k % cols))
    }

    /// Returns `true` if the basic cells form a spanning tree.
    pub fn is_spanning_tree(&self) -> bool {
        if self.len != self.required() {
            return false;
        }
        let mut sets = DisjointSet::new(self.rows + self.cols);
        self.cells().all(|(i, j)| sets.union(i, self.rows + j))
    }

    /// Pads the basis to a spanning tree with zero-quantity cells.
    ///
    /// Existing cells are kept. Cells are added in row-major order whenever
    /// they join two components not yet connected, so the result is always
    /// connected and acyclic. Returns the number of cells added (zero when
    /// the basis already was a spanning tree).
    ///
    /// # Errors
    ///
    /// [`TransportError::CyclicBasis`] if the existing cells already contain
    /// a cycle; padding cannot fix that.
    pub fn repair(&mut self) -> Result<usize, TransportError> {
        let m = self.rows;
        let mut sets = DisjointSet::new(m + self.cols);
        for (i, j) in self.cells() {
            if !sets.union(i, m + j) {
                return Err(TransportError::CyclicBasis { row: i, col: j });
            }
        }

        let mut added = 0;
        'pad: for i in 0..m {
            for j in 0..self.cols {
                if self.len >= self.required() {
                    break 'pad;
                }
                if !self.contains(i, j) && sets.union(i, m + j) {
                    self.insert(i, j);
                    added += 1;
                }
            }
        }

        if added > 0 {
            debug!(added, basic = self.len, "padded degenerate basis");
        }
        Ok(added)
    }

    /// Adjacency lists of the basis viewed as a bipartite graph.
    ///
    /// Returns `(columns of each row, rows of each column)`.
    pub(crate) fn adjacency(&self) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let mut row_adj = vec![Vec::new(); self.rows];
        let mut col_adj = vec![Vec::new(); self.cols];
        for (i, j) in self.cells() {
            row_adj[i].push(j);
            col_adj[j].push(i);
        }
        (row_adj, col_adj)
    }
}

/// Union-find over `0..n` with path halving.
#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        true
    }
}
