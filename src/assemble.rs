//! Boundary glue: map sparse result vectors back to node-keyed results.
//!
//! The engines work in dense index space; the caller owns the node-to-index
//! mapping it built the matrix with. This adapter relabels a sparse result
//! into a node-keyed map, filling indices absent from the result with a
//! caller-specified value.

use rustc_hash::FxHashMap;

use crate::error::{MetricsError, MetricsResult};
use crate::matrix::{Mask, SparseVector};

/// Node identifier type (u64)
pub type NodeId = u64;

/// Relabel a sparse result vector into a node-keyed map.
///
/// With a mask, the output holds exactly the mask's nodes; without one it
/// holds every node. Indices with no entry in `v` map to `fill`.
/// `index_to_node[i]` must be the node that dense index `i` was assigned to
/// when the matrix was built.
pub fn to_node_map<T: Copy>(
    v: &SparseVector<T>,
    index_to_node: &[NodeId],
    mask: Option<&Mask>,
    fill: T,
) -> MetricsResult<FxHashMap<NodeId, T>> {
    if index_to_node.len() != v.size() {
        return Err(MetricsError::InvalidArgument(format!(
            "index mapping covers {} nodes but the result has size {}",
            index_to_node.len(),
            v.size()
        )));
    }
    let mut out = FxHashMap::default();
    match mask {
        Some(m) => {
            out.reserve(m.len());
            for &i in m.indices() {
                out.insert(index_to_node[i], v.get(i).unwrap_or(fill));
            }
        }
        None => {
            out.reserve(index_to_node.len());
            for (i, &node) in index_to_node.iter().enumerate() {
                out.insert(node, v.get(i).unwrap_or(fill));
            }
        }
    }
    Ok(out)
}
