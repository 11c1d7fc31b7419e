//! Global transitivity ratios.

use crate::matrix::ops::mxm_pair_masked;
use crate::matrix::CsrMatrix;

use super::properties::GraphProperties;
use super::triangles::total_triangles;

/// Transitivity of an undirected graph:
/// `6 · total_triangles / Σ deg·(deg−1)`.
///
/// A zero triangle total short-circuits to 0.0 before the degree sum is
/// computed; a positive total guarantees some degree is at least 2, so the
/// denominator is positive whenever the division runs.
pub fn transitivity(a: &CsrMatrix, props: &mut GraphProperties) -> f64 {
    let numerator = total_triangles(a, props);
    if numerator == 0 {
        return 0.0;
    }
    let degrees = props.degrees(a);
    let denominator: u64 = degrees.values().iter().map(|&d| d * (d - 1)).sum();
    6.0 * numerator as f64 / denominator as f64
}

/// Transitivity of a directed graph. `a` must be self-loop free.
///
/// Numerator: `sum(plus_pair(A @ Aᵀ) masked by A)`; denominator:
/// `Σ outdeg·(outdeg−1)`. No factor of 6: directed triads are not
/// overcounted the way symmetric traversal overcounts undirected ones.
pub fn transitivity_directed(a: &CsrMatrix) -> f64 {
    let numerator = mxm_pair_masked(a, a, a).reduce_scalar();
    if numerator == 0 {
        return 0.0;
    }
    let denominator: u64 = a
        .row_degrees()
        .values()
        .iter()
        .map(|&d| d * (d - 1))
        .sum();
    numerator as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_graph_transitivity_is_one() {
        let mut edges = Vec::new();
        for i in 0..4 {
            for j in (i + 1)..4 {
                edges.push((i, j));
            }
        }
        let a = CsrMatrix::from_edges_undirected(4, &edges);
        assert_eq!(transitivity(&a, &mut GraphProperties::new()), 1.0);
    }

    #[test]
    fn test_triangle_transitivity_is_one() {
        let a = CsrMatrix::from_edges_undirected(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(transitivity(&a, &mut GraphProperties::new()), 1.0);
    }

    #[test]
    fn test_star_short_circuits_to_zero() {
        // Star graph: plenty of open wedges, zero triangles. The numerator
        // short-circuit must return 0 without dividing.
        let a = CsrMatrix::from_edges_undirected(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(transitivity(&a, &mut GraphProperties::new()), 0.0);
    }

    #[test]
    fn test_triangle_with_tail_ratio() {
        // Triangles: 1. Degrees: 2, 2, 3, 1 -> sum d(d-1) = 2+2+6+0 = 10.
        let a = CsrMatrix::from_edges_undirected(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
        assert_eq!(transitivity(&a, &mut GraphProperties::new()), 0.6);
    }

    #[test]
    fn test_directed_cycle() {
        // One-way 3-cycle: numerator counts closed directed wedges via
        // A@Aᵀ on A's pattern; every out-degree is 1 so the undirected
        // wedge sum is 0 -- but the numerator is 0 too, short-circuit.
        let a = CsrMatrix::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(transitivity_directed(&a), 0.0);
    }

    #[test]
    fn test_directed_reciprocal_triangle() {
        let a = CsrMatrix::from_edges(
            3,
            &[(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0)],
        );
        // Numerator: each of 6 entries of A@Aᵀ on A's pattern counts 1
        // common out-neighbor. Denominator: 3 nodes with out-degree 2.
        assert_eq!(transitivity_directed(&a), 1.0);
    }
}
