//! Mapping from local dataset positions to kernel-matrix rows

use crate::core::{PerceptronError, Result};

/// Train and test index maps into a shared kernel matrix
///
/// `train[i]` is the kernel-matrix row of the i-th training example and
/// `test[j]` the row of the j-th test example. Both are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelIndex {
    train: Vec<usize>,
    test: Vec<usize>,
}

impl KernelIndex {
    /// Create index maps from explicit global indices
    pub fn new(train: Vec<usize>, test: Vec<usize>) -> Self {
        Self { train, test }
    }

    /// Training rows `0..n_train` followed by test rows `n_train..n_train + n_test`
    pub fn contiguous(n_train: usize, n_test: usize) -> Self {
        Self {
            train: (0..n_train).collect(),
            test: (n_train..n_train + n_test).collect(),
        }
    }

    /// Global indices of the training examples
    pub fn train(&self) -> &[usize] {
        &self.train
    }

    /// Global indices of the test examples
    pub fn test(&self) -> &[usize] {
        &self.test
    }

    /// Check map lengths against dataset sizes and entries against the kernel dimension
    pub fn validate(&self, train_size: usize, test_size: usize, kernel_dim: usize) -> Result<()> {
        if self.train.len() != train_size {
            return Err(PerceptronError::DimensionMismatch {
                expected: train_size,
                actual: self.train.len(),
            });
        }
        if self.test.len() != test_size {
            return Err(PerceptronError::DimensionMismatch {
                expected: test_size,
                actual: self.test.len(),
            });
        }
        check_bounds(&self.train, kernel_dim)?;
        check_bounds(&self.test, kernel_dim)
    }
}

/// Ensure every index addresses a row of a `bound`-sized kernel matrix
pub(crate) fn check_bounds(indices: &[usize], bound: usize) -> Result<()> {
    match indices.iter().find(|&&index| index >= bound) {
        Some(&index) => Err(PerceptronError::IndexOutOfBounds { index, bound }),
        None => Ok(()),
    }
}
