//! Direct dense solver using Faer: LU with partial (row) pivoting.
//!
//! Used wherever a dense system has to be solved, which here means the implicit Euler step over a
//! dense operator. The factorization is cached so that repeated solves with the same matrix
//! (constant time step, constant operator) only pay for the triangular substitutions.
//!
//! # References
//! - Faer documentation: https://github.com/sarah-ek/faer-rs
//! - Golub & Van Loan, Matrix Computations, §3.4

use crate::core::traits::{InnerProduct, MatVec};
use crate::error::FdError;
use crate::solver::LinearSolver;
use crate::utils::convergence::SolveStats;
use faer::linalg::solvers::{PartialPivLu, SolveCore};
use faer::traits::{ComplexField, RealField};
use faer::{Conj, Mat, MatMut};

/// Dense LU with row pivoting from Faer; the factorization is kept for reuse.
pub struct LuSolver<T> {
    factor: Option<PartialPivLu<T>>,
    dim: usize,
}

impl<T: ComplexField + RealField> LuSolver<T> {
    pub fn new() -> Self {
        LuSolver { factor: None, dim: 0 }
    }

    /// Factorize `a`, replacing any cached factorization.
    pub fn factor(&mut self, a: &Mat<T>) -> Result<(), FdError> {
        if a.nrows() != a.ncols() {
            return Err(FdError::DimensionMismatch(format!(
                "LU needs a square matrix, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        self.factor = Some(PartialPivLu::new(a.as_ref()));
        self.dim = a.nrows();
        Ok(())
    }

    /// Solve with the cached factorization; `x` receives the solution.
    pub fn solve_cached(&self, b: &[T], x: &mut [T]) -> Result<(), FdError>
    where
        T: Copy,
    {
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
        let x_mat = MatMut::from_column_major_slice_mut(x, n, 1);
        factor.solve_in_place_with_conj(Conj::No, x_mat);
        Ok(())
    }
}

impl LinearSolver<Mat<f64>, Vec<f64>> for LuSolver<f64> {
    type Error = FdError;
    type Scalar = f64;

    /// Factorize `a` and solve; the returned stats carry `||A x - b||`.
    fn solve(&mut self, a: &Mat<f64>, b: &Vec<f64>, x: &mut Vec<f64>) -> Result<SolveStats<f64>, FdError> {
        self.factor(a)?;
        x.resize(b.len(), 0.0);
        self.solve_cached(b, x)?;
        let mut ax = vec![0.0; b.len()];
        a.matvec(x, &mut ax);
        let r: Vec<f64> = ax.iter().zip(b).map(|(&axi, &bi)| bi - axi).collect();
        let res = ().norm(&r);
        log::debug!("LU solve n={} residual={:e}", b.len(), res);
        Ok(SolveStats::direct(res))
    }
}

impl<T: ComplexField + RealField> Default for LuSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Tridiagonal;
    use approx::assert_relative_eq;

    /// `tridiag(-1, 4, -1)` of size `n`.
    fn banded(n: usize) -> Mat<f64> {
        Tridiagonal::new(vec![-1.0; n], vec![4.0; n], vec![-1.0; n]).unwrap().to_dense()
    }

    #[test]
    fn band_systems_stay_finite_at_every_size() {
        for n in [1, 2, 10, 16, 20, 40, 101] {
            let a = banded(n);
            let b: Vec<f64> = (0..n).map(|i| 1.0 + i as f64).collect();
            let mut x = Vec::new();
            let stats = LuSolver::<f64>::new().solve(&a, &b, &mut x).unwrap();
            assert!(x.iter().all(|v| v.is_finite()), "n = {n}");
            assert!(stats.converged);
            assert!(stats.final_residual < 1e-10 * n as f64, "n = {n}: {}", stats.final_residual);
        }
    }

    #[test]
    fn pivoting_handles_zero_leading_entry() {
        // [[0, 1], [1, 1]] x = [2, 3]  ->  x = [1, 2]
        let a = Mat::from_fn(2, 2, |i, j| if i == 0 && j == 0 { 0.0 } else { 1.0 });
        let mut x = vec![0.0; 2];
        LuSolver::<f64>::new().solve(&a, &vec![2.0, 3.0], &mut x).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-14);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-14);
    }

    #[test]
    fn cached_factor_is_reused() {
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 1.0 });
        let mut solver = LuSolver::<f64>::new();
        assert!(solver.solve_cached(&[1.0, 1.0], &mut [0.0, 0.0]).is_err());
        solver.factor(&a).unwrap();
        let mut x = [0.0; 2];
        solver.solve_cached(&[3.0, 3.0], &mut x).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
        assert!(matches!(solver.solve_cached(&[1.0], &mut [0.0]), Err(FdError::DimensionMismatch(_))));
    }

    #[test]
    fn rectangular_matrix_rejected() {
        let a = Mat::from_fn(2, 3, |_, _| 1.0);
        let mut solver = LuSolver::<f64>::new();
        assert!(solver.factor(&a).is_err());
    }
}
