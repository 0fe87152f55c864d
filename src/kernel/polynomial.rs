//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = <x, y>^d
//!
//! There is no scaling factor and no independent term; with d = 1 it is the
//! plain linear kernel.

use crate::kernel::traits::{dot_product, Kernel};

/// Largest degree evaluated with integer powers
pub const MAX_DEGREE: u32 = i32::MAX as u32;

/// Homogeneous polynomial kernel of a given degree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialKernel {
    /// Degree of the polynomial
    pub degree: u32,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel
    ///
    /// # Arguments
    /// * `degree` - Degree of the polynomial, in `1..=MAX_DEGREE`
    ///
    /// # Examples
    /// ```
    /// use kperceptron::kernel::{Kernel, PolynomialKernel};
    ///
    /// let kernel = PolynomialKernel::new(2);
    /// assert_eq!(kernel.compute(&[1.0, 2.0], &[2.0, 1.0]), 16.0);
    /// ```
    pub fn new(degree: u32) -> Self {
        assert!(degree > 0, "Polynomial degree must be positive");
        assert!(degree <= MAX_DEGREE, "Polynomial degree must not exceed MAX_DEGREE");
        Self { degree }
    }

    /// Degree-1 kernel, i.e. the plain dot product
    pub fn linear() -> Self {
        Self::new(1)
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        let dot = dot_product(x, y);
        match i32::try_from(self.degree) {
            Ok(degree) => dot.powi(degree),
            Err(_) => dot.powf(f64::from(self.degree)),
        }
    }
}
