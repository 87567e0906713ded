//! Direct solver interfaces.

use crate::utils::convergence::SolveStats;

/// Common interface for the direct solvers.
pub trait LinearSolver<M, V> {
    type Error;
    type Scalar: Copy + PartialOrd + From<f64>;
    /// Solve A·x = b, writing result into `x`.
    /// Returns solve stats (including the measured residual).
    fn solve(
        &mut self,
        a: &M,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<<Self as LinearSolver<M, V>>::Scalar>, Self::Error>;
}

pub mod direct_lu;
pub use direct_lu::LuSolver;

pub mod sparse_lu;
pub use sparse_lu::SparseLuSolver;

pub mod odd_even;
pub use odd_even::{OddEvenReduction, odd_even_reduce};
