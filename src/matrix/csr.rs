//! Immutable square sparse matrix in Compressed Sparse Row format.
//!
//! The adjacency matrix is the sole input of every metric query. Algorithms
//! read its sparsity pattern; optional per-entry weights are carried for
//! callers that built a weighted graph but are ignored by the structural
//! metrics.

use crate::matrix::vector::SparseVector;

/// Square sparse matrix over dense node indices `0..n`.
///
/// Column indices are sorted and deduplicated within each row. The matrix is
/// never mutated after construction; triangular splits, transposes and
/// off-diagonal selections are produced as fresh matrices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrMatrix {
    /// Number of nodes (the matrix is n x n)
    pub n: usize,
    /// Row pointers: row i spans col_idx[row_ptr[i]..row_ptr[i + 1]]
    pub row_ptr: Vec<usize>,
    /// Column indices, sorted within each row
    pub col_idx: Vec<usize>,
    /// Optional edge weights aligned with `col_idx`
    pub values: Option<Vec<f64>>,
}

impl CsrMatrix {
    /// Empty n x n matrix.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            row_ptr: vec![0; n + 1],
            col_idx: Vec::new(),
            values: None,
        }
    }

    /// Build from a directed edge list. Duplicate edges collapse to one entry.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut pairs: Vec<(usize, usize)> = edges.to_vec();
        Self::from_pairs(n, &mut pairs)
    }

    /// Build from an edge list, mirroring every edge (symmetric matrix).
    pub fn from_edges_undirected(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(edges.len() * 2);
        for &(r, c) in edges {
            pairs.push((r, c));
            if r != c {
                pairs.push((c, r));
            }
        }
        Self::from_pairs(n, &mut pairs)
    }

    /// Build a weighted matrix from COO triplets. Duplicates are summed.
    pub fn from_entries(n: usize, entries: &[(usize, usize, f64)]) -> Self {
        let mut triplets: Vec<(usize, usize, f64)> = entries.to_vec();
        triplets.sort_unstable_by_key(|&(r, c, _)| (r, c));

        let mut cols: Vec<usize> = Vec::with_capacity(triplets.len());
        let mut vals: Vec<f64> = Vec::with_capacity(triplets.len());
        let mut row_ptr = vec![0usize; n + 1];
        let mut cur_row = 0usize;
        let mut prev: Option<(usize, usize)> = None;

        for &(r, c, v) in &triplets {
            if prev == Some((r, c)) {
                if let Some(last) = vals.last_mut() {
                    *last += v;
                }
                continue;
            }
            while cur_row <= r {
                row_ptr[cur_row] = cols.len();
                cur_row += 1;
            }
            cols.push(c);
            vals.push(v);
            prev = Some((r, c));
        }
        while cur_row <= n {
            row_ptr[cur_row] = cols.len();
            cur_row += 1;
        }

        Self {
            n,
            row_ptr,
            col_idx: cols,
            values: Some(vals),
        }
    }

    fn from_pairs(n: usize, pairs: &mut Vec<(usize, usize)>) -> Self {
        pairs.sort_unstable();
        pairs.dedup();

        let mut row_ptr = vec![0usize; n + 1];
        let mut cols = Vec::with_capacity(pairs.len());
        let mut cur_row = 0usize;

        for &(r, c) in pairs.iter() {
            while cur_row <= r {
                row_ptr[cur_row] = cols.len();
                cur_row += 1;
            }
            cols.push(c);
        }
        while cur_row <= n {
            row_ptr[cur_row] = cols.len();
            cur_row += 1;
        }

        Self {
            n,
            row_ptr,
            col_idx: cols,
            values: None,
        }
    }

    /// Number of nodes.
    pub fn nrows(&self) -> usize {
        self.n
    }

    /// Number of stored entries.
    pub fn nvals(&self) -> usize {
        self.col_idx.len()
    }

    /// Whether the matrix carries edge weights.
    pub fn is_weighted(&self) -> bool {
        self.values.is_some()
    }

    /// Column indices of row `i` (the node's out-neighbor pattern).
    pub fn row(&self, i: usize) -> &[usize] {
        &self.col_idx[self.row_ptr[i]..self.row_ptr[i + 1]]
    }

    /// Whether entry (i, j) is present.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.row(i).binary_search(&j).is_ok()
    }

    /// Whether any diagonal entry (self-loop) is present.
    pub fn has_diagonal(&self) -> bool {
        (0..self.n).any(|i| self.contains(i, i))
    }

    /// Strictly lower triangular part (diagonal excluded).
    pub fn tril(&self) -> Self {
        self.select(|i, j| j < i)
    }

    /// Strictly upper triangular part (diagonal excluded).
    pub fn triu(&self) -> Self {
        self.select(|i, j| j > i)
    }

    /// All entries off the diagonal (self-loops removed).
    pub fn offdiag(&self) -> Self {
        self.select(|i, j| j != i)
    }

    fn select(&self, keep: impl Fn(usize, usize) -> bool) -> Self {
        let mut row_ptr = Vec::with_capacity(self.n + 1);
        let mut cols = Vec::new();
        let mut vals = self.values.as_ref().map(|_| Vec::new());

        row_ptr.push(0);
        for i in 0..self.n {
            let start = self.row_ptr[i];
            for (k, &j) in self.row(i).iter().enumerate() {
                if keep(i, j) {
                    cols.push(j);
                    if let (Some(out), Some(src)) = (vals.as_mut(), self.values.as_ref()) {
                        out.push(src[start + k]);
                    }
                }
            }
            row_ptr.push(cols.len());
        }

        Self {
            n: self.n,
            row_ptr,
            col_idx: cols,
            values: vals,
        }
    }

    /// Transposed matrix (counting sort over columns; weights follow).
    pub fn transpose(&self) -> Self {
        let n = self.n;
        let mut counts = vec![0usize; n + 1];
        for &j in &self.col_idx {
            counts[j + 1] += 1;
        }
        for i in 0..n {
            counts[i + 1] += counts[i];
        }
        let row_ptr = counts.clone();

        let mut cols = vec![0usize; self.col_idx.len()];
        let mut vals = self
            .values
            .as_ref()
            .map(|v| vec![0.0f64; v.len()]);
        let mut next = counts;

        for i in 0..n {
            let start = self.row_ptr[i];
            for (k, &j) in self.row(i).iter().enumerate() {
                let pos = next[j];
                next[j] += 1;
                cols[pos] = i;
                if let (Some(out), Some(src)) = (vals.as_mut(), self.values.as_ref()) {
                    out[pos] = src[start + k];
                }
            }
        }

        Self {
            n,
            row_ptr,
            col_idx: cols,
            values: vals,
        }
    }

    /// Per-row entry counts as a sparse vector; rows without entries are
    /// absent (GraphBLAS count-reduction semantics).
    pub fn row_degrees(&self) -> SparseVector<u64> {
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for i in 0..self.n {
            let d = self.row_ptr[i + 1] - self.row_ptr[i];
            if d > 0 {
                indices.push(i);
                values.push(d as u64);
            }
        }
        SparseVector::from_sorted(self.n, indices, values)
    }

    /// Per-column entry counts as a sparse vector; empty columns are absent.
    pub fn column_degrees(&self) -> SparseVector<u64> {
        let mut counts = vec![0u64; self.n];
        for &j in &self.col_idx {
            counts[j] += 1;
        }
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for (j, &c) in counts.iter().enumerate() {
            if c > 0 {
                indices.push(j);
                values.push(c);
            }
        }
        SparseVector::from_sorted(self.n, indices, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_tail() -> CsrMatrix {
        // 0-1-2 triangle plus pendant edge 2-3
        CsrMatrix::from_edges_undirected(4, &[(0, 1), (1, 2), (0, 2), (2, 3)])
    }

    #[test]
    fn test_from_edges_undirected_symmetric() {
        let a = triangle_with_tail();
        assert_eq!(a.nvals(), 8);
        for i in 0..4 {
            for &j in a.row(i) {
                assert!(a.contains(j, i), "missing mirror of ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_triangular_split_partitions_offdiag() {
        let a = CsrMatrix::from_edges_undirected(3, &[(0, 1), (1, 2), (2, 2)]);
        let l = a.tril();
        let u = a.triu();
        assert_eq!(l.nvals() + u.nvals(), a.offdiag().nvals());
        // U is the transpose of L for a symmetric matrix
        assert_eq!(u, l.transpose());
    }

    #[test]
    fn test_transpose_roundtrip() {
        let a = CsrMatrix::from_edges(4, &[(0, 1), (0, 3), (2, 1), (3, 0)]);
        assert_eq!(a.transpose().transpose(), a);
        assert!(a.transpose().contains(1, 0));
        assert!(!a.transpose().contains(0, 1));
    }

    #[test]
    fn test_offdiag_drops_self_loops() {
        let a = CsrMatrix::from_edges(3, &[(0, 0), (0, 1), (2, 2)]);
        assert!(a.has_diagonal());
        let off = a.offdiag();
        assert!(!off.has_diagonal());
        assert_eq!(off.nvals(), 1);
    }

    #[test]
    fn test_degrees_skip_empty_rows() {
        let a = triangle_with_tail();
        let deg = a.row_degrees();
        assert_eq!(deg.get(2), Some(3));
        assert_eq!(deg.get(3), Some(1));

        let b = CsrMatrix::from_edges(3, &[(0, 1)]);
        assert_eq!(b.row_degrees().nvals(), 1);
        assert_eq!(b.row_degrees().get(2), None);
        assert_eq!(b.column_degrees().get(1), Some(1));
    }

    #[test]
    fn test_weighted_entries_summed() {
        let a = CsrMatrix::from_entries(2, &[(0, 1, 1.5), (0, 1, 0.5), (1, 0, 2.0)]);
        assert!(a.is_weighted());
        assert_eq!(a.nvals(), 2);
        let vals = a.values.as_ref().unwrap();
        assert_eq!(vals[0], 2.0);
    }
}
