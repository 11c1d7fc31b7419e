//! Metric engines and their query entry points.
//!
//! Directedness is resolved once, at entry: wrap the adjacency matrix in
//! [`Undirected`] or [`Directed`] and every formula branch is picked by the
//! implementation, not re-checked per step. Both views implement
//! [`GraphMetrics`].

pub mod clustering;
pub mod properties;
pub mod transitivity;
pub mod triangles;

use tracing::debug;

use crate::error::{MetricsError, MetricsResult};
use crate::matrix::{CsrMatrix, Mask, SparseVector};

pub use properties::GraphProperties;

/// Triangle and clustering queries over one adjacency representation.
///
/// Methods take `&mut self` so derived artifacts (triangular splits,
/// degrees, transposes) computed by one query are reused by the next query
/// on the same view. Dropping the view discards everything; nothing
/// persists across views and the input matrix is never touched.
pub trait GraphMetrics {
    /// Per-node triangle counts, optionally restricted to `mask`.
    /// Nodes in no triangle have no entry.
    fn triangles(&mut self, mask: Option<&Mask>) -> MetricsResult<SparseVector<u64>>;

    /// Triangle count through a single node.
    fn node_triangles(&mut self, index: usize) -> MetricsResult<u64>;

    /// Total triangle count as one scalar.
    fn total_triangles(&mut self) -> MetricsResult<u64>;

    /// Per-node clustering coefficients, optionally restricted to `mask`.
    fn clustering(&mut self, mask: Option<&Mask>) -> MetricsResult<SparseVector<f64>>;

    /// Clustering coefficient of a single node.
    fn node_clustering(&mut self, index: usize) -> MetricsResult<f64>;

    /// Mean clustering coefficient. With `count_zeros`, nodes that produced
    /// no clustering value still contribute a zero to the mean.
    fn average_clustering(&mut self, mask: Option<&Mask>, count_zeros: bool)
        -> MetricsResult<f64>;

    /// Global transitivity ratio.
    fn transitivity(&mut self) -> MetricsResult<f64>;

    /// Weight-aware clustering is outside the masked-matrix family; callers
    /// must dispatch to a reference implementation.
    fn clustering_weighted(&mut self, _mask: Option<&Mask>) -> MetricsResult<SparseVector<f64>> {
        Err(MetricsError::NotImplemented(
            "weighted clustering; dispatch to a reference algorithm".into(),
        ))
    }
}

fn check_index(n: usize, index: usize) -> MetricsResult<()> {
    if index >= n {
        return Err(MetricsError::InvalidArgument(format!(
            "node index {index} out of range for {n} nodes"
        )));
    }
    Ok(())
}

fn check_mask(n: usize, mask: Option<&Mask>) -> MetricsResult<()> {
    if let Some(m) = mask {
        if m.size() != n {
            return Err(MetricsError::InvalidArgument(format!(
                "mask built for {} nodes used on a matrix of {} nodes",
                m.size(),
                n
            )));
        }
    }
    Ok(())
}

/// Metric view over a symmetric adjacency matrix.
///
/// Owns a [`GraphProperties`] cache; seed it via [`Undirected::with_properties`]
/// to reuse artifacts computed elsewhere.
pub struct Undirected<'a> {
    adj: &'a CsrMatrix,
    props: GraphProperties,
}

impl<'a> Undirected<'a> {
    pub fn new(adj: &'a CsrMatrix) -> Self {
        Self {
            adj,
            props: GraphProperties::new(),
        }
    }

    /// Attach precomputed properties (L, U, degrees, self-loop flag).
    pub fn with_properties(adj: &'a CsrMatrix, props: GraphProperties) -> Self {
        Self { adj, props }
    }
}

impl GraphMetrics for Undirected<'_> {
    fn triangles(&mut self, mask: Option<&Mask>) -> MetricsResult<SparseVector<u64>> {
        check_mask(self.adj.nrows(), mask)?;
        debug!("counting triangles over {} nodes", self.adj.nrows());
        Ok(triangles::triangles(self.adj, mask, &mut self.props))
    }

    fn node_triangles(&mut self, index: usize) -> MetricsResult<u64> {
        check_index(self.adj.nrows(), index)?;
        Ok(triangles::single_triangle(self.adj, index, &mut self.props))
    }

    fn total_triangles(&mut self) -> MetricsResult<u64> {
        Ok(triangles::total_triangles(self.adj, &mut self.props))
    }

    fn clustering(&mut self, mask: Option<&Mask>) -> MetricsResult<SparseVector<f64>> {
        check_mask(self.adj.nrows(), mask)?;
        debug!("computing clustering for {} nodes", self.adj.nrows());
        Ok(clustering::clustering(self.adj, mask, &mut self.props))
    }

    fn node_clustering(&mut self, index: usize) -> MetricsResult<f64> {
        check_index(self.adj.nrows(), index)?;
        Ok(clustering::single_clustering(self.adj, index, &mut self.props))
    }

    fn average_clustering(
        &mut self,
        mask: Option<&Mask>,
        count_zeros: bool,
    ) -> MetricsResult<f64> {
        check_mask(self.adj.nrows(), mask)?;
        if self.adj.nrows() == 0 {
            return Err(MetricsError::DivisionByZero(
                "average clustering of a graph with no nodes".into(),
            ));
        }
        clustering::average_clustering(self.adj, mask, count_zeros, &mut self.props)
    }

    fn transitivity(&mut self) -> MetricsResult<f64> {
        debug!("computing transitivity over {} nodes", self.adj.nrows());
        Ok(transitivity::transitivity(self.adj, &mut self.props))
    }
}

/// Metric view over a general (directed) adjacency matrix.
///
/// The self-loop flag defaults to `true` (conservative); a caller that knows
/// the diagonal is empty can skip the off-diagonal selection via
/// [`Directed::with_self_loops`]. The off-diagonal matrix and its transpose
/// are computed once and shared by every query on the view.
pub struct Directed<'a> {
    adj: &'a CsrMatrix,
    self_loops: bool,
    off: Option<CsrMatrix>,
    off_t: Option<CsrMatrix>,
}

impl<'a> Directed<'a> {
    pub fn new(adj: &'a CsrMatrix) -> Self {
        Self {
            adj,
            self_loops: true,
            off: None,
            off_t: None,
        }
    }

    /// Declare whether the matrix may contain diagonal entries.
    pub fn with_self_loops(mut self, flag: bool) -> Self {
        self.self_loops = flag;
        self
    }

    /// Self-loop-free matrix and its transpose, derived once.
    fn matrices(&mut self) -> (&CsrMatrix, &CsrMatrix) {
        if self.self_loops && self.off.is_none() {
            self.off = Some(self.adj.offdiag());
        }
        if self.off_t.is_none() {
            let base = match (self.self_loops, &self.off) {
                (true, Some(off)) => off,
                _ => self.adj,
            };
            self.off_t = Some(base.transpose());
        }
        let a = match (self.self_loops, &self.off) {
            (true, Some(off)) => off,
            _ => self.adj,
        };
        match &self.off_t {
            Some(at) => (a, at),
            None => unreachable!("transpose computed above"),
        }
    }
}

impl GraphMetrics for Directed<'_> {
    fn triangles(&mut self, mask: Option<&Mask>) -> MetricsResult<SparseVector<u64>> {
        check_mask(self.adj.nrows(), mask)?;
        debug!("counting directed triangles over {} nodes", self.adj.nrows());
        let (a, at) = self.matrices();
        Ok(triangles::triangles_directed(a, at, mask))
    }

    fn node_triangles(&mut self, index: usize) -> MetricsResult<u64> {
        check_index(self.adj.nrows(), index)?;
        let (a, at) = self.matrices();
        Ok(triangles::single_triangle_directed(a, at, index))
    }

    /// No directed formula variant covers a global triangle scalar.
    fn total_triangles(&mut self) -> MetricsResult<u64> {
        Err(MetricsError::NotImplemented(
            "total triangle scalar for directed graphs".into(),
        ))
    }

    fn clustering(&mut self, mask: Option<&Mask>) -> MetricsResult<SparseVector<f64>> {
        check_mask(self.adj.nrows(), mask)?;
        debug!("computing directed clustering for {} nodes", self.adj.nrows());
        let (a, at) = self.matrices();
        Ok(clustering::clustering_directed(a, at, mask))
    }

    fn node_clustering(&mut self, index: usize) -> MetricsResult<f64> {
        check_index(self.adj.nrows(), index)?;
        let (a, at) = self.matrices();
        Ok(clustering::single_clustering_directed(a, at, index))
    }

    fn average_clustering(
        &mut self,
        mask: Option<&Mask>,
        count_zeros: bool,
    ) -> MetricsResult<f64> {
        check_mask(self.adj.nrows(), mask)?;
        if self.adj.nrows() == 0 {
            return Err(MetricsError::DivisionByZero(
                "average clustering of a graph with no nodes".into(),
            ));
        }
        let (a, at) = self.matrices();
        clustering::average_clustering_directed(a, at, mask, count_zeros)
    }

    fn transitivity(&mut self) -> MetricsResult<f64> {
        debug!(
            "computing directed transitivity over {} nodes",
            self.adj.nrows()
        );
        let (a, _) = self.matrices();
        Ok(transitivity::transitivity_directed(a))
    }
}
