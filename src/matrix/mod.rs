//! Sparse-matrix substrate: CSR adjacency matrices, sparse vectors,
//! validated output masks, and the mask-restricted product primitive the
//! metric engines are built from.

pub mod csr;
pub mod mask;
pub mod ops;
pub mod vector;

pub use csr::CsrMatrix;
pub use mask::Mask;
pub use ops::{ewise_pair_rowcount, mxm_pair_masked, mxv_pair_masked_sum, MaskedProduct};
pub use vector::SparseVector;
