//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-γ * ||x - y||²)
//! where γ (gamma) controls the kernel width.

use crate::kernel::traits::{squared_euclidean_distance, Kernel};

/// Gaussian kernel: K(x, y) = exp(-γ * ||x - y||²)
///
/// High gamma makes the kernel local (each training point only influences its
/// close neighbourhood); low gamma makes it smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    pub(crate) gamma: f64,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with specified gamma parameter
    ///
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 0.0, "Gamma must be positive, got: {}", gamma);
        Self { gamma }
    }

    /// Create a Gaussian kernel with gamma = 1.0 / n_features
    pub fn with_auto_gamma(n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(1.0 / n_features as f64)
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Kernel for GaussianKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (-self.gamma * squared_euclidean_distance(x, y)).exp()
    }
}
