//! Mask-restricted sparse products and their reductions.
//!
//! Every triangle and clustering formula in this crate is a combination of
//! one primitive: a sparse product whose output is restricted to the
//! sparsity pattern of another sparse structure, accumulating with the
//! "plus over pair" monoid (count the index matches, ignore stored values).
//! Restricting the product to an existing pattern is what keeps the
//! algorithms sub-quadratic on sparse inputs.

use rayon::prelude::*;

use crate::matrix::csr::CsrMatrix;
use crate::matrix::vector::SparseVector;

/// Result of a mask-restricted matrix product: the mask's pattern (or a
/// subset of it) with a positive match count per surviving entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedProduct {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    counts: Vec<u64>,
}

/// Number of indices common to two sorted index slices.
pub(crate) fn intersect_count(a: &[usize], b: &[usize]) -> u64 {
    let mut count = 0u64;
    let (mut p, mut q) = (0usize, 0usize);
    while p < a.len() && q < b.len() {
        if a[p] == b[q] {
            count += 1;
            p += 1;
            q += 1;
        } else if a[p] < b[q] {
            p += 1;
        } else {
            q += 1;
        }
    }
    count
}

/// `plus_pair(A @ Bᵀ)` restricted to `mask`'s pattern.
///
/// `bt` is the second operand supplied pre-transposed, so the entry at
/// `(i, j)` is the size of the intersection of `a.row(i)` and `bt.row(j)`.
/// Entries with a zero count are absent from the result, matching GraphBLAS
/// masked-multiply semantics. Rows are processed in parallel.
pub fn mxm_pair_masked(a: &CsrMatrix, bt: &CsrMatrix, mask: &CsrMatrix) -> MaskedProduct {
    let n = mask.nrows();
    let rows: Vec<(Vec<usize>, Vec<u64>)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let ar = a.row(i);
            let mut cols = Vec::new();
            let mut counts = Vec::new();
            if !ar.is_empty() {
                for &j in mask.row(i) {
                    let c = intersect_count(ar, bt.row(j));
                    if c > 0 {
                        cols.push(j);
                        counts.push(c);
                    }
                }
            }
            (cols, counts)
        })
        .collect();

    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut col_idx = Vec::new();
    let mut counts = Vec::new();
    row_ptr.push(0);
    for (cols, cnts) in rows {
        col_idx.extend(cols);
        counts.extend(cnts);
        row_ptr.push(col_idx.len());
    }

    MaskedProduct {
        n,
        row_ptr,
        col_idx,
        counts,
    }
}

/// `plus_pair(A @ v)` restricted to `out_mask` and reduced to a scalar:
/// the sum over `i` in `out_mask` of `|a.row(i) ∩ v|`.
///
/// Both `v` and `out_mask` are sparse patterns given as sorted index slices.
pub fn mxv_pair_masked_sum(a: &CsrMatrix, v: &[usize], out_mask: &[usize]) -> u64 {
    out_mask
        .iter()
        .map(|&i| intersect_count(a.row(i), v))
        .sum()
}

/// Per-row count of positions present in both `a` and `b`
/// (`pair(A & B)` reduced rowwise). Rows with no common entry are absent.
pub fn ewise_pair_rowcount(a: &CsrMatrix, b: &CsrMatrix) -> SparseVector<u64> {
    let n = a.nrows();
    let mut indices = Vec::new();
    let mut values = Vec::new();
    for i in 0..n {
        let c = intersect_count(a.row(i), b.row(i));
        if c > 0 {
            indices.push(i);
            values.push(c);
        }
    }
    SparseVector::from_sorted(n, indices, values)
}

impl MaskedProduct {
    fn row(&self, i: usize) -> (&[usize], &[u64]) {
        let span = self.row_ptr[i]..self.row_ptr[i + 1];
        (&self.col_idx[span.clone()], &self.counts[span])
    }

    /// Row sums; rows without entries are absent.
    pub fn reduce_rowwise(&self) -> SparseVector<u64> {
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for i in 0..self.n {
            let (_, counts) = self.row(i);
            if !counts.is_empty() {
                indices.push(i);
                values.push(counts.iter().sum());
            }
        }
        SparseVector::from_sorted(self.n, indices, values)
    }

    /// Column sums; columns without entries are absent.
    pub fn reduce_columnwise(&self) -> SparseVector<u64> {
        let mut sums = vec![0u64; self.n];
        for (&j, &c) in self.col_idx.iter().zip(self.counts.iter()) {
            sums[j] += c;
        }
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for (j, &s) in sums.iter().enumerate() {
            if s > 0 {
                indices.push(j);
                values.push(s);
            }
        }
        SparseVector::from_sorted(self.n, indices, values)
    }

    /// Sum of every stored count.
    pub fn reduce_scalar(&self) -> u64 {
        self.counts.iter().sum()
    }
}
