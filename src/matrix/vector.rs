//! Sparse vectors over node-index space.

use crate::matrix::mask::Mask;

/// Sparse vector: sorted indices with parallel values and a logical size.
///
/// Metric results use this shape so that "no entry" (node excluded from the
/// computation) stays distinct from "entry with value zero".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseVector<T> {
    n: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Copy> SparseVector<T> {
    /// Vector of logical size `n` with no entries.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from pre-sorted, deduplicated indices.
    pub fn from_sorted(n: usize, indices: Vec<usize>, values: Vec<T>) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(indices.last().map_or(true, |&i| i < n));
        Self { n, indices, values }
    }

    /// Logical size (number of node indices).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of stored entries.
    pub fn nvals(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at index `i`, if an entry exists.
    pub fn get(&self, i: usize) -> Option<T> {
        self.indices
            .binary_search(&i)
            .ok()
            .map(|pos| self.values[pos])
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate entries as (index, value).
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Restrict entries to the mask's indices.
    pub fn masked(&self, mask: &Mask) -> Self {
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for (i, v) in self.iter() {
            if mask.contains(i) {
                indices.push(i);
                values.push(v);
            }
        }
        Self {
            n: self.n,
            indices,
            values,
        }
    }
}

impl SparseVector<u64> {
    /// Element-wise union add: entries present in either operand, summed
    /// where both are present (GraphBLAS ewise_add with plus).
    pub fn union_add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.n, other.n);
        let mut indices = Vec::with_capacity(self.nvals().max(other.nvals()));
        let mut values = Vec::with_capacity(indices.capacity());
        let (mut p, mut q) = (0usize, 0usize);
        while p < self.indices.len() && q < other.indices.len() {
            let (i, j) = (self.indices[p], other.indices[q]);
            if i == j {
                indices.push(i);
                values.push(self.values[p] + other.values[q]);
                p += 1;
                q += 1;
            } else if i < j {
                indices.push(i);
                values.push(self.values[p]);
                p += 1;
            } else {
                indices.push(j);
                values.push(other.values[q]);
                q += 1;
            }
        }
        while p < self.indices.len() {
            indices.push(self.indices[p]);
            values.push(self.values[p]);
            p += 1;
        }
        while q < other.indices.len() {
            indices.push(other.indices[q]);
            values.push(other.values[q]);
            q += 1;
        }
        Self {
            n: self.n,
            indices,
            values,
        }
    }
}
