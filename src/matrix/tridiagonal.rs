//! Band storage for tridiagonal operators.

use faer::Mat;
use num_traits::Float;

use crate::core::traits::{Indexing, MatVec};
use crate::error::{FdError, Result};

/// `lower[i] x[i-1] + diag[i] x[i] + upper[i] x[i+1]`; `lower[0]` and `upper[n-1]` are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Tridiagonal<T> {
    pub lower: Vec<T>,
    pub diag: Vec<T>,
    pub upper: Vec<T>,
}

impl<T: Float> Tridiagonal<T> {
    pub fn new(lower: Vec<T>, diag: Vec<T>, upper: Vec<T>) -> Result<Self> {
        let n = diag.len();
        if n == 0 || lower.len() != n || upper.len() != n {
            return Err(FdError::DimensionMismatch(format!(
                "bands of length {}/{}/{}",
                lower.len(),
                n,
                upper.len()
            )));
        }
        Ok(Self { lower, diag, upper })
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Extract the three bands of a dense matrix; any nonzero outside them is rejected.
    pub fn from_dense(m: &Mat<T>) -> Result<Self> {
        let n = m.nrows();
        if n == 0 || m.ncols() != n {
            return Err(FdError::DimensionMismatch(format!("{}x{} is not square", n, m.ncols())));
        }
        for j in 0..n {
            for i in 0..n {
                if i.abs_diff(j) > 1 && m[(i, j)] != T::zero() {
                    return Err(FdError::Unsupported("operator is not tridiagonal"));
                }
            }
        }
        let lower = (0..n).map(|i| if i > 0 { m[(i, i - 1)] } else { T::zero() }).collect();
        let diag = (0..n).map(|i| m[(i, i)]).collect();
        let upper = (0..n).map(|i| if i + 1 < n { m[(i, i + 1)] } else { T::zero() }).collect();
        Ok(Self { lower, diag, upper })
    }

    pub fn to_dense(&self) -> Mat<T> {
        let n = self.len();
        Mat::from_fn(n, n, |i, j| {
            if i == j {
                self.diag[i]
            } else if i == j + 1 {
                self.lower[i]
            } else if j == i + 1 {
                self.upper[i]
            } else {
                T::zero()
            }
        })
    }
}

impl<T: Float> MatVec<Vec<T>> for Tridiagonal<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        let n = self.len();
        assert_eq!(x.len(), n, "Input vector x has incorrect length");
        assert_eq!(y.len(), n, "Output vector y has incorrect length");
        for i in 0..n {
            let mut acc = self.diag[i] * x[i];
            if i > 0 {
                acc = acc + self.lower[i] * x[i - 1];
            }
            if i + 1 < n {
                acc = acc + self.upper[i] * x[i + 1];
            }
            y[i] = acc;
        }
    }
}

impl<T> Indexing for Tridiagonal<T> {
    fn nrows(&self) -> usize {
        self.diag.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_round_trip_keeps_bands() {
        let t = Tridiagonal::new(vec![0.0, 1.0, 2.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 0.0]).unwrap();
        let m = t.to_dense();
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(1, 2)], 8.0);
        assert_eq!(m[(0, 2)], 0.0);
        assert_eq!(Tridiagonal::from_dense(&m).unwrap(), t);
    }

    #[test]
    fn wide_band_rejected() {
        let mut m = Mat::<f64>::identity(3, 3);
        m[(0, 2)] = 1.0;
        assert_eq!(Tridiagonal::from_dense(&m), Err(FdError::Unsupported("operator is not tridiagonal")));
    }

    #[test]
    fn matvec_matches_dense() {
        let t = Tridiagonal::new(vec![0.0, -1.0, -1.0], vec![2.0, 2.0, 2.0], vec![-1.0, -1.0, 0.0]).unwrap();
        let x = vec![1.0, 2.0, 3.0];
        let mut y = vec![0.0; 3];
        t.matvec(&x, &mut y);
        assert_eq!(y, vec![0.0, 0.0, 4.0]);
    }

    #[test]
    fn mismatched_bands_rejected() {
        assert!(Tridiagonal::new(vec![0.0], vec![1.0, 2.0], vec![0.0, 0.0]).is_err());
    }
}
