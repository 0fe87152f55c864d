//! Multi-class kernel perceptron
//!
//! Online mistake-driven training of a dual-form perceptron against a
//! precomputed kernel (Gram) matrix, with One-vs-All and One-vs-One
//! multi-class decomposition.

pub mod api;
pub mod classifier;
pub mod core;
pub mod data;
pub mod kernel;

// Re-export main types for convenience
pub use crate::api::{FittedPerceptron, Perceptron};
pub use crate::classifier::{
    Decomposition, EpochRecord, EvaluationReport, KernelPerceptron, OneVsAll, OneVsOne,
    StopReason, TrainingReport,
};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{PerceptronError, Result};
pub use crate::data::{KernelIndex, LabelledDataset};
pub use crate::kernel::{
    cross_gram_matrix, gram_matrix, is_symmetric, GaussianKernel, Kernel, KernelMatrix,
    KernelType, PolynomialKernel,
};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
