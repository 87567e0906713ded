//! Odd-even (cyclic) reduction for tridiagonal systems.
//!
//! Solves `a_i x_{i-1} + b_i x_i + c_i x_{i+1} = d_i` by eliminating the even-indexed unknowns
//! from every odd-indexed row, which leaves a tridiagonal system of half the size on the odd
//! unknowns. The reduced system is solved recursively and the even unknowns are recovered from
//! their own rows in a single pass. A one-unknown system is solved directly.
//!
//! Work is `O(n)` over `O(log n)` levels. Each level is independent across rows, but the
//! implementation here is sequential.
//!
//! # References
//! - Hockney, R. W. (1965). A fast direct solution of Poisson's equation using Fourier analysis.
//! - Golub & Van Loan, Matrix Computations, §4.3

use faer::Mat;
use num_traits::Float;

use crate::core::traits::{InnerProduct, MatVec};
use crate::error::{FdError, Result};
use crate::matrix::Tridiagonal;
use crate::solver::LinearSolver;
use crate::utils::convergence::SolveStats;

/// Solve a tridiagonal system given as bands. `lower[0]` and `upper[n-1]` are ignored.
pub fn odd_even_reduce<T: Float>(lower: &[T], diag: &[T], upper: &[T], rhs: &[T]) -> Result<Vec<T>> {
    let n = rhs.len();
    if n == 0 || lower.len() != n || diag.len() != n || upper.len() != n {
        return Err(FdError::DimensionMismatch(format!(
            "bands {}/{}/{} for a right-hand side of length {}",
            lower.len(),
            diag.len(),
            upper.len(),
            n
        )));
    }
    let mut a = lower.to_vec();
    let mut c = upper.to_vec();
    a[0] = T::zero();
    c[n - 1] = T::zero();
    reduce(&a, diag, &c, rhs, Level { offset: 0, stride: 1 })
}

/// Maps rows of a reduced system back to rows of the original one, for error reporting.
#[derive(Clone, Copy)]
struct Level {
    offset: usize,
    stride: usize,
}

impl Level {
    fn row(self, k: usize) -> usize {
        self.offset + k * self.stride
    }

    fn next(self) -> Level {
        Level { offset: self.offset + self.stride, stride: self.stride * 2 }
    }
}

fn pivot<T: Float>(b: &[T], k: usize, level: Level) -> Result<T> {
    if b[k] == T::zero() {
        return Err(FdError::ZeroPivot(level.row(k)));
    }
    Ok(b[k])
}

fn reduce<T: Float>(a: &[T], b: &[T], c: &[T], d: &[T], level: Level) -> Result<Vec<T>> {
    let n = d.len();
    if n == 1 {
        return Ok(vec![d[0] / pivot(b, 0, level)?]);
    }

    let half = n / 2;
    let mut a_half = Vec::with_capacity(half);
    let mut b_half = Vec::with_capacity(half);
    let mut c_half = Vec::with_capacity(half);
    let mut d_half = Vec::with_capacity(half);

    for k in 0..half {
        let j = 2 * k + 1;
        let alpha = -a[j] / pivot(b, j - 1, level)?;
        let (beta, a_right, c_right, d_right) = if j + 1 < n {
            (-c[j] / pivot(b, j + 1, level)?, a[j + 1], c[j + 1], d[j + 1])
        } else {
            (T::zero(), T::zero(), T::zero(), T::zero())
        };
        a_half.push(alpha * a[j - 1]);
        b_half.push(b[j] + alpha * c[j - 1] + beta * a_right);
        c_half.push(beta * c_right);
        d_half.push(d[j] + alpha * d[j - 1] + beta * d_right);
    }

    let x_half = reduce(&a_half, &b_half, &c_half, &d_half, level.next())?;

    let mut x = vec![T::zero(); n];
    for (k, xk) in x_half.into_iter().enumerate() {
        x[2 * k + 1] = xk;
    }
    for i in (0..n).step_by(2) {
        let left = if i > 0 { a[i] * x[i - 1] } else { T::zero() };
        let right = if i + 1 < n { c[i] * x[i + 1] } else { T::zero() };
        x[i] = (d[i] - left - right) / pivot(b, i, level)?;
    }
    Ok(x)
}

/// Tridiagonal solver by odd-even reduction.
#[derive(Debug, Default, Clone, Copy)]
pub struct OddEvenReduction;

impl OddEvenReduction {
    pub fn new() -> Self {
        OddEvenReduction
    }
}

impl<T> LinearSolver<Tridiagonal<T>, Vec<T>> for OddEvenReduction
where
    T: Float + From<f64>,
{
    type Error = FdError;
    type Scalar = T;

    fn solve(&mut self, a: &Tridiagonal<T>, b: &Vec<T>, x: &mut Vec<T>) -> Result<SolveStats<T>> {
        *x = odd_even_reduce(&a.lower, &a.diag, &a.upper, b)?;
        let mut ax = vec![T::zero(); b.len()];
        a.matvec(x, &mut ax);
        let r: Vec<T> = ax.iter().zip(b).map(|(&axi, &bi)| bi - axi).collect();
        let res = ().norm(&r);
        log::trace!("odd-even reduction n={}", b.len());
        Ok(SolveStats::direct(res))
    }
}

/// The reduction only understands band storage; a general dense matrix is refused.
impl<T> LinearSolver<Mat<T>, Vec<T>> for OddEvenReduction
where
    T: Float + From<f64>,
{
    type Error = FdError;
    type Scalar = T;

    fn solve(&mut self, _a: &Mat<T>, _b: &Vec<T>, _x: &mut Vec<T>) -> Result<SolveStats<T>> {
        Err(FdError::Unsupported("odd-even reduction on a dense matrix; extract the bands with Tridiagonal::from_dense"))
    }
}
