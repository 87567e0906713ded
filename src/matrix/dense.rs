//! Dense-operator helpers on top of Faer.

use crate::core::traits::{Indexing, MatVec};
use faer::Mat;

/// What the implicit integrators need from a dense operator beyond `y = A x`.
pub trait DenseMatrix<T>: MatVec<Vec<T>> + Indexing + Sized {
    /// `I + scale * self`; with `scale = -h` this is the backward Euler matrix.
    fn shifted_identity(&self, scale: T) -> Self;
}

impl<T: num_traits::Float> DenseMatrix<T> for Mat<T> {
    fn shifted_identity(&self, scale: T) -> Self {
        assert_eq!(self.nrows(), self.ncols(), "shifted_identity needs a square matrix");
        Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            let id = if i == j { T::one() } else { T::zero() };
            id + scale * self[(i, j)]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_touches_only_the_diagonal_identity() {
        let a = Mat::from_fn(2, 2, |i, j| [[1.0, 2.0], [3.0, 4.0]][i][j]);
        let m = a.shifted_identity(-0.5);
        assert_eq!(m[(0, 0)], 0.5);
        assert_eq!(m[(0, 1)], -1.0);
        assert_eq!(m[(1, 0)], -1.5);
        assert_eq!(m[(1, 1)], -1.0);
    }
}
