//! Closed-loop tracing for an entering cell.
//!
//! Adding a non-basic cell `(r, c)` to a spanning-tree basis closes exactly
//! one cycle: the edge itself plus the unique tree path from row `r` to
//! column `c`. Walking that path backwards from column `c` alternates
//! vertical and horizontal moves and returns to row `r`.

use std::collections::VecDeque;

use crate::error::TransportError;

use super::basis::Basis;

/// Traces the closed loop through `entering` and the basic cells.
///
/// The returned cells start with `entering` and alternate `+` (even
/// positions) and `−` (odd positions). The loop always has an even length of
/// at least four.
///
/// # Errors
///
/// [`TransportError::LoopNotFound`] if `entering` is already basic or the
/// basis does not connect its row and column.
///
/// # Examples
///
/// ```
/// use u_transport::modi::{trace_loop, Basis};
///
/// let basis = Basis::from_cells(2, 2, [(0, 0), (0, 1), (1, 1)]);
/// let cycle = trace_loop(&basis, (1, 0)).expect("tree");
/// assert_eq!(cycle, vec![(1, 0), (0, 0), (0, 1), (1, 1)]);
/// ```
pub fn trace_loop(
    basis: &Basis,
    entering: (usize, usize),
) -> Result<Vec<(usize, usize)>, TransportError> {
    let (r, c) = entering;
    let not_found = TransportError::LoopNotFound { row: r, col: c };
    if basis.contains(r, c) {
        return Err(not_found);
    }

    let m = basis.rows();
    let (row_adj, col_adj) = basis.adjacency();
    let target = m + c;

    // Breadth-first search over tree nodes from row r; parent[node] is the
    // node it was discovered from.
    let mut parent: Vec<Option<usize>> = vec![None; m + basis.cols()];
    let mut visited = vec![false; m + basis.cols()];
    visited[r] = true;
    let mut queue = VecDeque::from([r]);

    while let Some(node) = queue.pop_front() {
        if node == target {
            break;
        }
        let neighbors: Box<dyn Iterator<Item = usize> + '_> = if node < m {
            Box::new(row_adj[node].iter().map(move |&j| m + j))
        } else {
            Box::new(col_adj[node - m].iter().copied())
        };
        for next in neighbors {
            if !visited[next] {
                visited[next] = true;
                parent[next] = Some(node);
                queue.push_back(next);
            }
        }
    }

    if !visited[target] {
        return Err(not_found);
    }

    let mut cycle = vec![entering];
    let mut node = target;
    while node != r {
        let Some(prev) = parent[node] else {
            return Err(not_found);
        };
        let cell = if node < m {
            (node, prev - m)
        } else {
            (prev, node - m)
        };
        cycle.push(cell);
        node = prev;
    }

    Ok(cycle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_alternates_rows_and_columns() {
        // NW staircase on 3×4; entering (2,0).
        let basis = Basis::from_cells(3, 4, [(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 3)]);
        let cycle = trace_loop(&basis, (2, 0)).expect("tree");
        assert_eq!(
            cycle,
            vec![(2, 0), (0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]
        );
        for k in 0..cycle.len() {
            let a = cycle[k];
            let b = cycle[(k + 1) % cycle.len()];
            if k % 2 == 0 {
                assert_eq!(a.1, b.1, "{a:?} -> {b:?} should be vertical");
            } else {
                assert_eq!(a.0, b.0, "{a:?} -> {b:?} should be horizontal");
            }
        }
    }

    #[test]
    fn test_loop_skips_side_branches() {
        // (0,2) hangs off row 0 but is not on the loop for (1,0).
        let basis = Basis::from_cells(2, 3, [(0, 0), (0, 1), (0, 2), (1, 1)]);
        let cycle = trace_loop(&basis, (1, 0)).expect("tree");
        assert_eq!(cycle, vec![(1, 0), (0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_basic_entering_rejected() {
        let basis = Basis::from_cells(2, 2, [(0, 0), (0, 1), (1, 1)]);
        assert_eq!(
            trace_loop(&basis, (0, 0)),
            Err(TransportError::LoopNotFound { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_disconnected_rejected() {
        let basis = Basis::from_cells(2, 2, [(0, 0), (1, 1)]);
        assert_eq!(
            trace_loop(&basis, (1, 0)),
            Err(TransportError::LoopNotFound { row: 1, col: 0 })
        );
    }
}
