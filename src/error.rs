use thiserror::Error;

use crate::index::Dim;

pub type Result<T> = std::result::Result<T, AlgebraError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("index dimensions {0} and {1} cannot be ordered")]
    IncomparableDimensions(Dim, Dim),
    #[error("recursion depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },
    #[error("no fixed point reached after {passes} passes")]
    NoFixedPoint { passes: usize },
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}
