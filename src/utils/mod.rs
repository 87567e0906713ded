//! Solve statistics and error measures.

pub mod convergence;

pub use convergence::{SolveStats, max_abs_error, observed_order};
