//! Matrix module: tridiagonal, sparse (CSR) and dense operator storage.

pub mod dense;
pub mod sparse;
pub mod tridiagonal;

pub use dense::DenseMatrix;
pub use sparse::{CsrMatrix, SparseMatrix};
pub use tridiagonal::Tridiagonal;
