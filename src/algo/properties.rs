//! Lazily derived adjacency-matrix properties shared across metric queries.

use crate::matrix::{CsrMatrix, SparseVector};

/// Cached derivations of one adjacency matrix: triangular halves, degree
/// vector, and the self-loop flag.
///
/// Every field is optional. A caller that already computed a piece (for
/// example L, while chaining triangle counts into clustering) seeds it here
/// and the accessors reuse it; missing pieces are computed on first need.
/// The cache never mutates the adjacency matrix and is meant to live for a
/// single batch of queries against one matrix.
#[derive(Debug, Default, Clone)]
pub struct GraphProperties {
    lower: Option<CsrMatrix>,
    upper: Option<CsrMatrix>,
    degrees: Option<SparseVector<u64>>,
    self_loops: Option<bool>,
}

impl GraphProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the strictly lower triangular matrix.
    pub fn with_lower(mut self, lower: CsrMatrix) -> Self {
        self.lower = Some(lower);
        self
    }

    /// Seed the strictly upper triangular matrix.
    pub fn with_upper(mut self, upper: CsrMatrix) -> Self {
        self.upper = Some(upper);
        self
    }

    /// Seed the degree vector.
    pub fn with_degrees(mut self, degrees: SparseVector<u64>) -> Self {
        self.degrees = Some(degrees);
        self
    }

    /// Seed the self-loop flag (caller knows the graph shape).
    pub fn with_self_loops(mut self, flag: bool) -> Self {
        self.self_loops = Some(flag);
        self
    }

    /// Strictly lower triangular part of `a`, computed once.
    pub fn lower(&mut self, a: &CsrMatrix) -> &CsrMatrix {
        self.lower.get_or_insert_with(|| a.tril())
    }

    /// Strictly upper triangular part of `a`, computed once.
    pub fn upper(&mut self, a: &CsrMatrix) -> &CsrMatrix {
        self.upper.get_or_insert_with(|| a.triu())
    }

    /// Both triangular halves at once.
    pub fn split(&mut self, a: &CsrMatrix) -> (&CsrMatrix, &CsrMatrix) {
        if self.lower.is_none() {
            self.lower = Some(a.tril());
        }
        if self.upper.is_none() {
            self.upper = Some(a.triu());
        }
        match (&self.lower, &self.upper) {
            (Some(l), Some(u)) => (l, u),
            _ => unreachable!("triangular halves computed above"),
        }
    }

    /// Whether `a` has diagonal entries.
    ///
    /// Inferred from entry counts when a triangular half is available: a
    /// symmetric matrix with self-loops has more than double the entries of
    /// its strictly-triangular half. With nothing to compare against, the
    /// conservative answer is `true`, which forces the exact (self-loop
    /// aware) code paths; that default is not cached, so a later inference
    /// can still improve it.
    pub fn self_loops(&mut self, a: &CsrMatrix) -> bool {
        if let Some(flag) = self.self_loops {
            return flag;
        }
        let inferred = if let Some(l) = &self.lower {
            Some(a.nvals() > 2 * l.nvals())
        } else {
            self.upper.as_ref().map(|u| a.nvals() > 2 * u.nvals())
        };
        match inferred {
            Some(flag) => {
                self.self_loops = Some(flag);
                flag
            }
            None => true,
        }
    }

    /// Degree vector of `a`, self-loops excluded.
    ///
    /// With self-loops present (or presumed), degrees come from the
    /// triangular halves so the diagonal never counts; without them the
    /// full matrix's row counts are used directly, which skips building
    /// L and U entirely.
    pub fn degrees(&mut self, a: &CsrMatrix) -> &SparseVector<u64> {
        if self.degrees.is_none() {
            let d = if self.self_loops(a) {
                let lower_counts = self.lower(a).row_degrees();
                let upper_counts = self.upper(a).row_degrees();
                lower_counts.union_add(&upper_counts)
            } else {
                a.row_degrees()
            };
            self.degrees = Some(d);
        }
        match &self.degrees {
            Some(d) => d,
            None => unreachable!("degrees computed above"),
        }
    }

    /// Degree vector if it has already been computed or supplied.
    pub fn degrees_if_known(&self) -> Option<&SparseVector<u64>> {
        self.degrees.as_ref()
    }
}
