//! Sparse direct solver over faer's supernodal/simplicial LU.
//!
//! The planar system has five nonzeros per row, so it is factorized in sparse form instead of
//! being densified. The factorization is cached like [`LuSolver`](crate::solver::LuSolver).

use faer::linalg::solvers::SolveCore;
use faer::sparse::linalg::solvers::Lu;
use faer::{Conj, MatMut};

use crate::core::traits::{InnerProduct, MatVec};
use crate::error::{FdError, Result};
use crate::matrix::CsrMatrix;
use crate::solver::LinearSolver;
use crate::utils::convergence::SolveStats;

#[derive(Default)]
pub struct SparseLuSolver {
    factor: Option<Lu<usize, f64>>,
    dim: usize,
}

impl SparseLuSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factorize `a`, replacing any cached factorization.
    pub fn factor(&mut self, a: &CsrMatrix) -> Result<()> {
        if a.nrows() != a.ncols() {
            return Err(FdError::DimensionMismatch(format!(
                "sparse LU needs a square matrix, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        let columns = a.to_col_major()?;
        let lu = columns.as_ref().sp_lu().map_err(|e| FdError::Factorization(format!("{e:?}")))?;
        self.factor = Some(lu);
        self.dim = a.nrows();
        Ok(())
    }

    pub fn solve_cached(&self, b: &[f64], x: &mut [f64]) -> Result<()> {
        let factor = self
            .factor
            .as_ref()
            .ok_or(FdError::Unsupported("solve_cached called before factorization"))?;
        if b.len() != self.dim || x.len() != self.dim {
            return Err(FdError::DimensionMismatch(format!(
                "rhs/solution of length {}/{} for a {}x{} factorization",
                b.len(),
                x.len(),
                self.dim,
                self.dim
            )));
        }
        let n = b.len();
        x.copy_from_slice(b);
        factor.solve_in_place_with_conj(Conj::No, MatMut::from_column_major_slice_mut(x, n, 1));
        Ok(())
    }
}

impl LinearSolver<CsrMatrix, Vec<f64>> for SparseLuSolver {
    type Error = FdError;
    type Scalar = f64;

    fn solve(&mut self, a: &CsrMatrix, b: &Vec<f64>, x: &mut Vec<f64>) -> Result<SolveStats<f64>> {
        self.factor(a)?;
        x.resize(b.len(), 0.0);
        self.solve_cached(b, x)?;
        let mut ax = vec![0.0; b.len()];
        a.matvec(x, &mut ax);
        let r: Vec<f64> = ax.iter().zip(b).map(|(&axi, &bi)| bi - axi).collect();
        let res = ().norm(&r);
        log::debug!("sparse LU solve n={} nnz={} residual={:e}", b.len(), a.nnz(), res);
        Ok(SolveStats::direct(res))
    }
}
