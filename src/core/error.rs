//! Error types for the kernel perceptron

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerceptronError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unsupported kernel: {0} (expected 'polynomial' or 'Gaussian')")]
    UnsupportedKernel(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Index {index} out of bounds for kernel matrix dimension {bound}")]
    IndexOutOfBounds { index: usize, bound: usize },

    #[error("Invalid label: {label} is not in [0, {nclasses})")]
    InvalidLabel { label: usize, nclasses: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PerceptronError>;
