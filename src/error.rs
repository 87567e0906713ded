use thiserror::Error;

// Unified error type for fdstep

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdError {
    #[error("invalid interval count {0}: at least one interval is required")]
    InvalidIntervalCount(usize),
    #[error("invalid domain [{left}, {right}]: bounds must be finite with left < right")]
    InvalidDomain { left: f64, right: f64 },
    #[error("grid points must be strictly increasing (violated at index {0})")]
    NonMonotonicGrid(usize),
    #[error("index {index} out of range for {len} grid points")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("node {index} has no {side} neighbour")]
    MissingNeighbor { side: &'static str, index: String },
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("time points must be strictly increasing and non-empty")]
    InvalidTimePoints,
    #[error("zero pivot at row {0}")]
    ZeroPivot(usize),
    #[error("factorization failed: {0}")]
    Factorization(String),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, FdError>;
