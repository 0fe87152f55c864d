//! Kernel trait definition

/// Kernel function trait
///
/// A kernel function K(x, y) computes the similarity of two dense feature
/// vectors. Implementations are stateless and only evaluated while building
/// the kernel matrix, never inside the training loop.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &[f64], y: &[f64]) -> f64;
}

/// Dot product of two dense vectors
pub(crate) fn dot_product(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(&a, &b)| a * b).sum()
}

/// Squared Euclidean distance of two dense vectors
pub(crate) fn squared_euclidean_distance(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(&a, &b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}
