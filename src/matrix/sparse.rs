// SparseMatrix trait and CSR storage for assembled stencil systems

use faer::Mat;
use faer::sparse::{SparseColMat, SparseRowMat, Triplet};

use crate::core::traits::{Indexing, MatVec};
use crate::error::{FdError, Result};

/// A read‐only sparse matrix supporting y = A * x.
pub trait SparseMatrix<T> {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
    /// Compute y = A * x.  `x.len() == ncols()`, `y.len() == nrows()`.
    fn spmv(&self, x: &[T], y: &mut [T]);
}

/// Row-compressed matrix backed by a faer `SparseRowMat`.
///
/// Always built from triplets, so the row pointers are compact and column indices sorted.
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    inner: SparseRowMat<usize, f64>,
}

impl CsrMatrix {
    /// Build from `(row, col, value)` triplets; duplicates are summed.
    pub fn from_triplets(nrows: usize, ncols: usize, entries: &[Triplet<usize, usize, f64>]) -> Result<Self> {
        if let Some(t) = entries.iter().find(|t| t.row >= nrows || t.col >= ncols) {
            return Err(FdError::DimensionMismatch(format!(
                "entry ({}, {}) outside a {nrows}x{ncols} matrix",
                t.row, t.col
            )));
        }
        let inner = SparseRowMat::try_new_from_triplets(nrows, ncols, entries)
            .map_err(|e| FdError::DimensionMismatch(format!("{e:?}")))?;
        Ok(Self { inner })
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    pub fn nnz(&self) -> usize {
        let m = self.inner.as_ref();
        let sym = m.symbolic();
        sym.row_ptr()[self.nrows()]
    }

    /// Entry `(i, j)`, zero when not stored.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let m = self.inner.as_ref();
        let sym = m.symbolic();
        let (row_ptr, col_idx, val) = (sym.row_ptr(), sym.col_idx(), m.val());
        (row_ptr[i]..row_ptr[i + 1]).find(|&k| col_idx[k] == j).map_or(0.0, |k| val[k])
    }

    pub fn to_dense(&self) -> Mat<f64> {
        self.inner.to_dense()
    }

    /// Same matrix in column-compressed form, as the sparse factorizations expect.
    pub fn to_col_major(&self) -> Result<SparseColMat<usize, f64>> {
        let m = self.inner.as_ref();
        let sym = m.symbolic();
        let (row_ptr, col_idx, val) = (sym.row_ptr(), sym.col_idx(), m.val());
        let mut triplets = Vec::with_capacity(val.len());
        for i in 0..self.nrows() {
            for k in row_ptr[i]..row_ptr[i + 1] {
                triplets.push(Triplet::new(i, col_idx[k], val[k]));
            }
        }
        SparseColMat::try_new_from_triplets(self.nrows(), self.ncols(), &triplets)
            .map_err(|e| FdError::DimensionMismatch(format!("{e:?}")))
    }
}

impl SparseMatrix<f64> for CsrMatrix {
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }
    fn ncols(&self) -> usize {
        self.inner.ncols()
    }
    fn spmv(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), CsrMatrix::ncols(self));
        assert_eq!(y.len(), CsrMatrix::nrows(self));
        let m = self.inner.as_ref();
        let sym = m.symbolic();
        let (row_ptr, col_idx, val) = (sym.row_ptr(), sym.col_idx(), m.val());
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = (row_ptr[i]..row_ptr[i + 1]).map(|k| val[k] * x[col_idx[k]]).sum();
        }
    }
}

impl MatVec<Vec<f64>> for CsrMatrix {
    fn matvec(&self, x: &Vec<f64>, y: &mut Vec<f64>) {
        self.spmv(x, y);
    }
}

impl Indexing for CsrMatrix {
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }
}
