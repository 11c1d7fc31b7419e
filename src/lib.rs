//! Trigraph
//!
//! Triangle counts, clustering coefficients, and transitivity over large
//! sparse graphs, computed as mask-restricted sparse-matrix products
//! instead of per-node traversal.
//!
//! # Architecture
//!
//! - `matrix`: the CSR adjacency matrix, sparse vectors, output masks, and
//!   the mask-restricted product primitive everything else is built from.
//! - `algo`: the metric engines. A property cache derives and memoizes the
//!   triangular split, degree vector and self-loop flag; the triangle,
//!   clustering and transitivity engines share those artifacts. Undirected
//!   and directed graphs get separate implementations behind one trait,
//!   selected once at query entry.
//! - `assemble`: boundary adapter relabeling dense-index results into
//!   node-keyed maps with a fill value.
//!
//! Building the adjacency matrix from an arbitrary graph representation,
//! weighted clustering, and any non-matrix algorithm path are the caller's
//! concern; the engines consume an already-built matrix and never mutate it.
//!
//! # Example
//!
//! ```rust
//! use trigraph::{CsrMatrix, GraphMetrics, Undirected};
//!
//! // Complete graph on 4 nodes
//! let mut edges = Vec::new();
//! for i in 0..4 {
//!     for j in (i + 1)..4 {
//!         edges.push((i, j));
//!     }
//! }
//! let adj = CsrMatrix::from_edges_undirected(4, &edges);
//!
//! let mut graph = Undirected::new(&adj);
//! assert_eq!(graph.total_triangles().unwrap(), 4);
//! assert_eq!(graph.transitivity().unwrap(), 1.0);
//! ```

pub mod algo;
pub mod assemble;
pub mod error;
pub mod matrix;

pub use algo::{Directed, GraphMetrics, GraphProperties, Undirected};
pub use assemble::{to_node_map, NodeId};
pub use error::{MetricsError, MetricsResult};
pub use matrix::{CsrMatrix, Mask, SparseVector};
