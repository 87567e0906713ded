//! Trait implementations for Faer's dense `Mat` and for plain `Vec<T>`.
//!
//! The products run column by column to follow Faer's column-major storage.

use crate::core::traits::{Indexing, InnerProduct, MatVec};
use faer::Mat;
use num_traits::Float;

impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.ncols(), x.len(), "matvec: x has {} entries for {} columns", x.len(), self.ncols());
        assert_eq!(self.nrows(), y.len(), "matvec: y has {} entries for {} rows", y.len(), self.nrows());
        y.iter_mut().for_each(|yi| *yi = T::zero());
        for (j, &xj) in x.iter().enumerate() {
            if xj == T::zero() {
                continue;
            }
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = *yi + self[(i, j)] * xj;
            }
        }
    }
}

/// Euclidean inner product; the unit receiver carries no state.
impl<T: Float + From<f64>> InnerProduct<Vec<T>> for () {
    type Scalar = T;

    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "dot: lengths {} and {}", x.len(), y.len());
        x.iter().zip(y).fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    fn norm(&self, x: &Vec<T>) -> T {
        self.dot(x, x).sqrt()
    }
}

impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}
