//! Closed set of supported kernels

use crate::core::{PerceptronError, Result};
use crate::kernel::{GaussianKernel, Kernel, PolynomialKernel, MAX_DEGREE};
use serde::{Deserialize, Serialize};

/// Kernel selection with its hyperparameter
///
/// Deserialized values go through [`KernelType::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", try_from = "RawKernelType")]
pub enum KernelType {
    /// K(x, y) = <x, y>^degree
    Polynomial { degree: u32 },
    /// K(x, y) = exp(-gamma * ||x - y||²)
    Gaussian { gamma: f64 },
}

/// Unchecked wire form of `KernelType`
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawKernelType {
    Polynomial { degree: u32 },
    Gaussian { gamma: f64 },
}

impl TryFrom<RawKernelType> for KernelType {
    type Error = PerceptronError;

    fn try_from(raw: RawKernelType) -> Result<Self> {
        let kernel = match raw {
            RawKernelType::Polynomial { degree } => Self::Polynomial { degree },
            RawKernelType::Gaussian { gamma } => Self::Gaussian { gamma },
        };
        kernel.validate()?;
        Ok(kernel)
    }
}

impl KernelType {
    /// Build a kernel from its name and scalar hyperparameter
    ///
    /// Accepts `"polynomial"` (parameter is the degree, a positive integer) and
    /// `"Gaussian"` (parameter is gamma, positive). Names are case-insensitive.
    pub fn from_name(name: &str, param: f64) -> Result<Self> {
        let kernel = match name.trim().to_ascii_lowercase().as_str() {
            "polynomial" => {
                if !(param >= 0.0 && param.fract() == 0.0 && param <= f64::from(u32::MAX)) {
                    return Err(PerceptronError::InvalidConfiguration(format!(
                        "polynomial degree must be a positive integer, got {param}"
                    )));
                }
                Self::Polynomial {
                    degree: param as u32,
                }
            }
            "gaussian" => Self::Gaussian { gamma: param },
            _ => return Err(PerceptronError::UnsupportedKernel(name.to_string())),
        };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Check the hyperparameter: degree in `1..=MAX_DEGREE`, gamma positive and finite
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Polynomial { degree } if degree == 0 || degree > MAX_DEGREE => {
                Err(PerceptronError::InvalidConfiguration(format!(
                    "polynomial degree must be in 1..={MAX_DEGREE}, got {degree}"
                )))
            }
            Self::Gaussian { gamma } if !(gamma > 0.0 && gamma.is_finite()) => {
                Err(PerceptronError::InvalidConfiguration(format!(
                    "gaussian gamma must be positive, got {gamma}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Scalar hyperparameter (degree or gamma)
    pub fn param(&self) -> f64 {
        match *self {
            Self::Polynomial { degree } => degree as f64,
            Self::Gaussian { gamma } => gamma,
        }
    }

    /// Evaluate the kernel on two points
    pub fn evaluate(&self, x: &[f64], y: &[f64]) -> f64 {
        self.compute(x, y)
    }
}

impl Kernel for KernelType {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        match *self {
            Self::Polynomial { degree } => PolynomialKernel { degree }.compute(x, y),
            Self::Gaussian { gamma } => GaussianKernel { gamma }.compute(x, y),
        }
    }
}
