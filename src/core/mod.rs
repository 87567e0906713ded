//! Core traits shared by operators, solvers and integrators.

pub mod traits;
pub mod wrappers;

pub use traits::{Indexing, InnerProduct, MatVec};
