//! Clustering coefficients built on the triangle engine and property cache.

use crate::error::{MetricsError, MetricsResult};
use crate::matrix::ops::{ewise_pair_rowcount, intersect_count};
use crate::matrix::{CsrMatrix, Mask, SparseVector};

use super::properties::GraphProperties;
use super::triangles::{single_triangle, single_triangle_directed, triangles, triangles_directed};

/// Per-node clustering coefficients of an undirected graph:
/// `2·tri[i] / (deg[i]·(deg[i]−1))`.
///
/// The result carries entries only on the triangle vector's pattern. A node
/// with fewer than two neighbors cannot close a triangle, so such nodes have
/// no entry and no division ever sees their zero denominator.
pub fn clustering(
    a: &CsrMatrix,
    mask: Option<&Mask>,
    props: &mut GraphProperties,
) -> SparseVector<f64> {
    let n = a.nrows();
    let tri = triangles(a, mask, props);
    let deg = props.degrees(a);
    let mut indices = Vec::with_capacity(tri.nvals());
    let mut values = Vec::with_capacity(tri.nvals());
    for (i, t) in tri.iter() {
        let d = deg.get(i).unwrap_or(0);
        if d >= 2 {
            indices.push(i);
            values.push(2.0 * t as f64 / (d * (d - 1)) as f64);
        }
    }
    SparseVector::from_sorted(n, indices, values)
}

/// Clustering coefficient of one node of an undirected graph.
///
/// A zero triangle count short-circuits to 0.0 before any degree work. The
/// degree comes from the cache when known, otherwise from the node's row
/// (minus a detected self-loop), which avoids building the full degree
/// vector for a point query.
pub fn single_clustering(a: &CsrMatrix, index: usize, props: &mut GraphProperties) -> f64 {
    let self_loops = props.self_loops(a);
    let tri = single_triangle(a, index, props);
    if tri == 0 {
        return 0.0;
    }
    let d = match props.degrees_if_known() {
        Some(deg) => deg.get(index).unwrap_or(0),
        None => {
            let row = a.row(index);
            let mut d = row.len() as u64;
            if self_loops && row.binary_search(&index).is_ok() {
                d -= 1;
            }
            d
        }
    };
    // tri > 0 implies two distinct neighbors, so d*(d-1) is positive.
    2.0 * tri as f64 / (d * (d - 1)) as f64
}

/// Per-node clustering coefficients of a directed graph:
/// `tri[i] / (total·(total−1) − 2·recip)`, where `total` combines in- and
/// out-degree and `recip` counts mutual neighbors. The subtraction corrects
/// for reciprocal pairs that the combined degree counts twice.
///
/// `a` must be self-loop free and `at` its transpose. Denominators are
/// guarded: an entry whose denominator is not positive is skipped rather
/// than emitted as NaN or a negative value.
pub fn clustering_directed(
    a: &CsrMatrix,
    at: &CsrMatrix,
    mask: Option<&Mask>,
) -> SparseVector<f64> {
    let n = a.nrows();
    let tri = triangles_directed(a, at, mask);
    let recip = ewise_pair_rowcount(a, at);
    let mut indices = Vec::with_capacity(tri.nvals());
    let mut values = Vec::with_capacity(tri.nvals());
    for (i, t) in tri.iter() {
        let total = (a.row(i).len() + at.row(i).len()) as i64;
        let r = recip.get(i).unwrap_or(0) as i64;
        let denom = total * (total - 1) - 2 * r;
        if denom > 0 {
            indices.push(i);
            values.push(t as f64 / denom as f64);
        }
    }
    SparseVector::from_sorted(n, indices, values)
}

/// Clustering coefficient of one node of a directed graph, from the node's
/// row and column patterns directly. `a` must be self-loop free and `at`
/// its transpose.
pub fn single_clustering_directed(a: &CsrMatrix, at: &CsrMatrix, index: usize) -> f64 {
    let tri = single_triangle_directed(a, at, index);
    if tri == 0 {
        return 0.0;
    }
    let r = a.row(index);
    let c = at.row(index);
    let total = (r.len() + c.len()) as i64;
    let recip = intersect_count(r, c) as i64;
    let denom = total * (total - 1) - 2 * recip;
    if denom <= 0 {
        return 0.0;
    }
    tri as f64 / denom as f64
}

/// Graph-averaged clustering coefficient of an undirected graph.
///
/// With `count_zeros` the divisor is the candidate node count (the mask's
/// size, or every node), so nodes without a clustering entry drag the mean
/// down as zeros. Without it the divisor is the number of produced entries.
/// A zero divisor is a `DivisionByZero` error, never a silent NaN.
pub fn average_clustering(
    a: &CsrMatrix,
    mask: Option<&Mask>,
    count_zeros: bool,
    props: &mut GraphProperties,
) -> MetricsResult<f64> {
    let c = clustering(a, mask, props);
    mean_of(&c, mask, count_zeros, a.nrows())
}

/// Graph-averaged clustering coefficient of a directed graph. `a` must be
/// self-loop free and `at` its transpose.
pub fn average_clustering_directed(
    a: &CsrMatrix,
    at: &CsrMatrix,
    mask: Option<&Mask>,
    count_zeros: bool,
) -> MetricsResult<f64> {
    let c = clustering_directed(a, at, mask);
    mean_of(&c, mask, count_zeros, a.nrows())
}

fn mean_of(
    c: &SparseVector<f64>,
    mask: Option<&Mask>,
    count_zeros: bool,
    n: usize,
) -> MetricsResult<f64> {
    let total: f64 = c.values().iter().sum();
    let divisor = if !count_zeros {
        c.nvals()
    } else {
        match mask {
            Some(m) => m.len(),
            None => n,
        }
    };
    if divisor == 0 {
        return Err(MetricsError::DivisionByZero(
            "average clustering over zero candidate nodes".into(),
        ));
    }
    Ok(total / divisor as f64)
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
    fn test_complete_graph_clusters_fully() {
        let a = k4();
        let mut props = GraphProperties::new();
        let c = clustering(&a, None, &mut props);
        for i in 0..4 {
            assert_eq!(c.get(i), Some(1.0));
            assert_eq!(single_clustering(&a, i, &mut GraphProperties::new()), 1.0);
        }
    }

    #[test]
    fn test_path_graph_has_no_entries() {
        // 0-1-2: no triangles, so no clustering entries at all,
        // including the degree-1 endpoints.
        let a = CsrMatrix::from_edges_undirected(3, &[(0, 1), (1, 2)]);
        let c = clustering(&a, None, &mut GraphProperties::new());
        assert!(c.is_empty());
        assert_eq!(single_clustering(&a, 1, &mut GraphProperties::new()), 0.0);
    }

    #[test]
    fn test_triangle_with_tail() {
        // Node 2 has degree 3 but only one triangle: 2*1/(3*2) = 1/3.
        let a = CsrMatrix::from_edges_undirected(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
        let mut props = GraphProperties::new();
        let c = clustering(&a, None, &mut props);
        assert_eq!(c.get(0), Some(1.0));
        assert_eq!(c.get(2), Some(1.0 / 3.0));
        assert_eq!(c.get(3), None);
        assert_eq!(single_clustering(&a, 2, &mut GraphProperties::new()), 1.0 / 3.0);
    }

    #[test]
    fn test_average_clustering_count_zeros() {
        // K4 plus an isolated node: counting zeros divides by 5,
        // otherwise by the 4 nodes that produced a value.
        let mut edges = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                edges.push((i, j));
            }
        }
        let a = CsrMatrix::from_edges_undirected(5, &edges);
        let with_zeros =
            average_clustering(&a, None, true, &mut GraphProperties::new()).unwrap();
        let without_zeros =
            average_clustering(&a, None, false, &mut GraphProperties::new()).unwrap();
        assert_eq!(with_zeros, 4.0 / 5.0);
        assert_eq!(without_zeros, 1.0);
        assert!(with_zeros < without_zeros);
    }

    #[test]
    fn test_average_clustering_zero_divisor() {
        let a = CsrMatrix::from_edges_undirected(3, &[(0, 1)]);
        // No node produced a clustering value and zeros are not counted.
        let err = average_clustering(&a, None, false, &mut GraphProperties::new()).unwrap_err();
        assert!(matches!(err, MetricsError::DivisionByZero(_)));
    }

    #[test]
    fn test_directed_reciprocal_triangle() {
        // Fully reciprocal 3-cycle behaves like a complete undirected
        // triangle: clustering 1.0 everywhere.
        let a = CsrMatrix::from_edges(
            3,
            &[(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0)],
        );
        let at = a.transpose();
        let c = clustering_directed(&a, &at, None);
        for i in 0..3 {
            assert_eq!(c.get(i), Some(1.0));
            assert_eq!(single_clustering_directed(&a, &at, i), 1.0);
        }
    }

    #[test]
    fn test_directed_cycle_clustering() {
        // One-way 3-cycle: each node sees one triangle, total degree 2,
        // no reciprocal edges: 1 / (2*1 - 0) = 0.5.
        let a = CsrMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let at = a.transpose();
        let c = clustering_directed(&a, &at, None);
        for i in 0..3 {
            assert_eq!(c.get(i), Some(0.5));
            assert_eq!(single_clustering_directed(&a, &at, i), 0.5);
        }
    }

    #[test]
    fn test_directed_masked_average() {
        let a = CsrMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let at = a.transpose();
        let mask = Mask::from_indices(3, [0, 2]).unwrap();
        let avg = average_clustering_directed(&a, &at, Some(&mask), true).unwrap();
        assert_eq!(avg, 0.5);
    }
}
