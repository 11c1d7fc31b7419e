//! Triangle counts from masked sparse products.
//!
//! Undirected counts run over the triangular split (SandiaDot formulation);
//! directed counts run over the full off-diagonal matrix and its transpose
//! because every edge-direction combination around a node closes a distinct
//! directed triangle.

use crate::matrix::ops::{mxm_pair_masked, mxv_pair_masked_sum};
use crate::matrix::{CsrMatrix, Mask, SparseVector};

use super::properties::GraphProperties;

/// Number of triangles through one node of an undirected graph.
///
/// Extracts the node's row, drops a diagonal entry if present, and counts
/// closed wedges with one masked product. With self-loops (or presumed
/// self-loops) the product runs over the strictly lower triangular matrix;
/// without them the full matrix is cheaper and the symmetric double count
/// is corrected by halving.
pub fn single_triangle(a: &CsrMatrix, index: usize, props: &mut GraphProperties) -> u64 {
    let r = a.row(index);
    if props.self_loops(a) {
        let r: Vec<usize> = r.iter().copied().filter(|&j| j != index).collect();
        let l = props.lower(a);
        mxv_pair_masked_sum(l, &r, &r)
    } else {
        mxv_pair_masked_sum(a, r, r) / 2
    }
}

/// Per-node triangle counts of an undirected graph, optionally restricted
/// to a node subset. Self-loops are ignored by construction.
///
/// SandiaDot: `C = plus_pair(L @ Lᵀ)` masked by L, then the triangle vector
/// is `rowsum(C) + colsum(C) + rowsum(plus_pair(U @ Lᵀ) masked by U)`.
/// Nodes in no triangle have no entry.
pub fn triangles(
    a: &CsrMatrix,
    mask: Option<&Mask>,
    props: &mut GraphProperties,
) -> SparseVector<u64> {
    let n = a.nrows();
    if n == 0 {
        return SparseVector::empty(0);
    }
    let (l, u) = props.split(a);
    let c = mxm_pair_masked(l, l, l);
    let tri = c
        .reduce_rowwise()
        .union_add(&c.reduce_columnwise())
        .union_add(&mxm_pair_masked(u, l, u).reduce_rowwise());
    match mask {
        Some(m) => tri.masked(m),
        None => tri,
    }
}

/// Total triangle count of an undirected graph as one scalar reduction:
/// `sum(plus_pair(L @ Uᵀ) masked by L)`. The cheapest path for purely
/// global totals; no triangle vector is materialized.
pub fn total_triangles(a: &CsrMatrix, props: &mut GraphProperties) -> u64 {
    if a.nrows() == 0 {
        return 0;
    }
    let (l, u) = props.split(a);
    mxm_pair_masked(l, u, l).reduce_scalar()
}

/// Directed triangle count through one node.
///
/// `a` must already be self-loop free and `at` its transpose. `r` is the
/// node's out-neighbor pattern, `c` its in-neighbor pattern; the four masked
/// products cover every direction combination, and no halving applies since
/// nothing is double counted.
pub fn single_triangle_directed(a: &CsrMatrix, at: &CsrMatrix, index: usize) -> u64 {
    let r = a.row(index);
    let c = at.row(index);
    mxv_pair_masked_sum(a, c, c)
        + mxv_pair_masked_sum(a, c, r)
        + mxv_pair_masked_sum(a, r, c)
        + mxv_pair_masked_sum(a, r, r)
}

/// Per-node directed triangle counts. `a` must be self-loop free and `at`
/// its transpose; every product is masked by `a`'s pattern.
pub fn triangles_directed(
    a: &CsrMatrix,
    at: &CsrMatrix,
    mask: Option<&Mask>,
) -> SparseVector<u64> {
    let n = a.nrows();
    if n == 0 {
        return SparseVector::empty(0);
    }
    let t = mxm_pair_masked(a, a, a);
    let tri = t
        .reduce_rowwise()
        .union_add(&t.reduce_columnwise())
        .union_add(&mxm_pair_masked(at, a, a).reduce_rowwise())
        .union_add(&mxm_pair_masked(at, at, a).reduce_columnwise());
    match mask {
        Some(m) => tri.masked(m),
        None => tri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4() -> CsrMatrix {
        let mut edges = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                edges.push((i, j));
            }
        }
        CsrMatrix::from_edges_undirected(4, &edges)
    }

    #[test]
    fn test_triangle_graph() {
        let a = CsrMatrix::from_edges_undirected(3, &[(0, 1), (1, 2), (0, 2)]);
        let mut props = GraphProperties::new();
        let tri = triangles(&a, None, &mut props);
        for i in 0..3 {
            assert_eq!(tri.get(i), Some(1));
        }
        assert_eq!(total_triangles(&a, &mut props), 1);
    }

    #[test]
    fn test_k4_counts() {
        let a = k4();
        let mut props = GraphProperties::new();
        // K4 holds 4 triangles; every node sits in 3 of them.
        assert_eq!(total_triangles(&a, &mut props), 4);
        let tri = triangles(&a, None, &mut props);
        for i in 0..4 {
            assert_eq!(tri.get(i), Some(3));
            assert_eq!(single_triangle(&a, i, &mut props), 3);
        }
    }

    #[test]
    fn test_star_graph_has_no_triangles() {
        let a = CsrMatrix::from_edges_undirected(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let mut props = GraphProperties::new();
        let tri = triangles(&a, None, &mut props);
        assert!(tri.is_empty());
        assert_eq!(total_triangles(&a, &mut props), 0);
        assert_eq!(single_triangle(&a, 0, &mut props), 0);
    }

    #[test]
    fn test_masked_batch_restricts_output() {
        let a = k4();
        let mask = Mask::from_indices(4, [1, 3]).unwrap();
        let tri = triangles(&a, Some(&mask), &mut GraphProperties::new());
        assert_eq!(tri.nvals(), 2);
        assert_eq!(tri.get(1), Some(3));
        assert_eq!(tri.get(0), None);
    }

    #[test]
    fn test_self_loops_do_not_change_counts() {
        let clean = k4();
        let loopy = {
            let mut edges = vec![(0, 0), (2, 2)];
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((i, j));
                }
            }
            CsrMatrix::from_edges_undirected(4, &edges)
        };
        let tri_clean = triangles(&clean, None, &mut GraphProperties::new());
        let tri_loopy = triangles(&loopy, None, &mut GraphProperties::new());
        assert_eq!(tri_clean, tri_loopy);
        for i in 0..4 {
            assert_eq!(
                single_triangle(&clean, i, &mut GraphProperties::new()),
                single_triangle(&loopy, i, &mut GraphProperties::new()),
            );
        }
    }

    #[test]
    fn test_single_matches_batch_without_loops() {
        // Force the halved full-matrix path by declaring no self-loops.
        let a = k4();
        let mut props = GraphProperties::new().with_self_loops(false);
        for i in 0..4 {
            assert_eq!(single_triangle(&a, i, &mut props), 3);
        }
    }

    #[test]
    fn test_directed_cycle_counts() {
        // Directed 3-cycle: 0->1->2->0. Each node closes one directed
        // triangle per orientation pairing it participates in.
        let a = CsrMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let at = a.transpose();
        let tri = triangles_directed(&a, &at, None);
        for i in 0..3 {
            assert_eq!(tri.get(i), Some(single_triangle_directed(&a, &at, i)));
            assert!(tri.get(i).unwrap_or(0) > 0);
        }
    }

    #[test]
    fn test_directed_empty_graph() {
        let a = CsrMatrix::empty(0);
        let at = a.transpose();
        assert!(triangles_directed(&a, &at, None).is_empty());
    }
}
