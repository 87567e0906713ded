//! Operator and vector traits shared by the matrix storages, the solvers and the integrators.

/// `y = A x` for an operator `A` acting on vectors of type `V`.
///
/// Implemented by every storage the crate assembles into (dense, band, CSR), so residuals and
/// explicit rates are written once against this trait.
pub trait MatVec<V> {
    fn matvec(&self, x: &V, y: &mut V);
}

/// Euclidean geometry on vectors of type `V`; implemented on `()` for plain `Vec`s.
pub trait InnerProduct<V> {
    type Scalar: Copy + PartialOrd + From<f64>;

    fn dot(&self, x: &V, y: &V) -> Self::Scalar;

    /// Residual norm reported in `SolveStats`.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Row count of an operator.
pub trait Indexing {
    fn nrows(&self) -> usize;
}
