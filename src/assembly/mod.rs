//! Assembly of stencil rows into linear operators and forcing vectors.
//!
//! The radial stencil produces a tridiagonal operator over its unknowns `1..=N`; the planar
//! stencil produces a sparse five-point system over every node in row-major order.

pub mod cache;

pub use cache::{OperatorCache, OperatorKey};

use faer::sparse::Triplet;

use crate::error::Result;
use crate::matrix::{CsrMatrix, Tridiagonal};
use crate::stencil::{LineStencil, PlaneStencil};

/// Tridiagonal operator of a line stencil at time `t`. Row `r - 1` holds unknown `r`.
pub fn line_operator<S: LineStencil + ?Sized>(stencil: &S, t: f64) -> Result<Tridiagonal<f64>> {
    let n = stencil.unknowns();
    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];
    for row in 0..n {
        let r = row + 1;
        diag[row] = stencil.c(r, t)?;
        if row > 0 {
            lower[row] = stencil.a(r, t)?;
        }
        if row + 1 < n {
            upper[row] = stencil.b(r, t)?;
        }
    }
    Tridiagonal::new(lower, diag, upper)
}

/// Forcing vector of a line stencil at time `t`.
pub fn line_forcing<S: LineStencil + ?Sized>(stencil: &S, t: f64) -> Result<Vec<f64>> {
    (1..=stencil.unknowns()).map(|r| stencil.g(r, t)).collect()
}

/// Sparse planar system `A u = g` over all nodes, in row-major node order.
pub fn plane_system(stencil: &PlaneStencil) -> Result<(CsrMatrix, Vec<f64>)> {
    let n = stencil.unknowns();
    let stride = stencil.x_grid().len();
    let mut triplets = Vec::with_capacity(5 * n);
    let mut rhs = Vec::with_capacity(n);
    for row in 0..n {
        let index = stencil.unflat(row);
        let s = stencil.row(index)?;
        let mut couple = |col: usize, value: f64| {
            if value != 0.0 {
                triplets.push(Triplet::new(row, col, value));
            }
        };
        if index.j > 0 {
            couple(row - stride, s.d);
        }
        if index.i > 0 {
            couple(row - 1, s.a);
        }
        couple(row, s.c);
        if index.i + 1 < stride {
            couple(row + 1, s.b);
        }
        if row + stride < n {
            couple(row + stride, s.e);
        }
        rhs.push(s.g);
    }
    let matrix = CsrMatrix::from_triplets(n, n, &triplets)?;
    log::debug!(
        "assembled planar system: {} unknowns, {} nonzeros, scheme {:?}",
        n,
        matrix.nnz(),
        stencil.scheme()
    );
    Ok((matrix, rhs))
}
