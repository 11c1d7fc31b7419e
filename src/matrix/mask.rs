//! Output masks: validated node-index subsets.

use crate::error::{MetricsError, MetricsResult};

/// A sorted, deduplicated set of node indices restricting which nodes a
/// query emits output for. `None` at the query boundary means "all nodes".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mask {
    n: usize,
    indices: Vec<usize>,
}

impl Mask {
    /// Build a mask for a graph of `n` nodes. Fails with `InvalidArgument`
    /// if any index falls outside `0..n`.
    pub fn from_indices(n: usize, indices: impl IntoIterator<Item = usize>) -> MetricsResult<Self> {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        if let Some(&last) = indices.last() {
            if last >= n {
                return Err(MetricsError::InvalidArgument(format!(
                    "mask index {last} out of range for {n} nodes"
                )));
            }
        }
        Ok(Self { n, indices })
    }

    /// The node count this mask was validated against.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, i: usize) -> bool {
        self.indices.binary_search(&i).is_ok()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
