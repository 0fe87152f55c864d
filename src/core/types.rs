//! Core type definitions for the kernel perceptron

use crate::core::{PerceptronError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multi-class decomposition strategy
///
/// Serialized as `"OvA"` / `"OvO"`; parsing from strings or JSON ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClassificationMethod {
    /// One-vs-All: one decision function per class
    #[default]
    OneVsAll,
    /// One-vs-One: one decision function per class pair `(a, b)` with `a < b`
    OneVsOne,
}

impl ClassificationMethod {
    /// Number of decision functions for `nclasses` classes
    pub fn n_decision_functions(&self, nclasses: usize) -> usize {
        match self {
            Self::OneVsAll => nclasses,
            Self::OneVsOne => nclasses * nclasses.saturating_sub(1) / 2,
        }
    }
}

impl FromStr for ClassificationMethod {
    type Err = PerceptronError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ova" => Ok(Self::OneVsAll),
            "ovo" => Ok(Self::OneVsOne),
            other => Err(PerceptronError::InvalidConfiguration(format!(
                "unknown classification method '{other}', expected 'OvA' or 'OvO'"
            ))),
        }
    }
}

impl TryFrom<String> for ClassificationMethod {
    type Error = PerceptronError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ClassificationMethod> for String {
    fn from(method: ClassificationMethod) -> Self {
        method.to_string()
    }
}

impl fmt::Display for ClassificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneVsAll => write!(f, "OvA"),
            Self::OneVsOne => write!(f, "OvO"),
        }
    }
}

/// Construction parameters for a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptronConfig {
    /// Number of classes (labels are `0..nclasses`)
    pub nclasses: usize,
    /// Kernel hyperparameter the kernel matrix was built with (degree or gamma)
    #[serde(default)]
    pub kernel_param: f64,
    /// Multi-class decomposition
    #[serde(default)]
    pub method: ClassificationMethod,
}

impl PerceptronConfig {
    /// Create a One-vs-All configuration for `nclasses` classes
    pub fn new(nclasses: usize) -> Self {
        Self {
            nclasses,
            kernel_param: 0.0,
            method: ClassificationMethod::OneVsAll,
        }
    }

    /// Set the decomposition strategy
    pub fn with_method(mut self, method: ClassificationMethod) -> Self {
        self.method = method;
        self
    }

    /// Record the kernel hyperparameter
    pub fn with_kernel_param(mut self, kernel_param: f64) -> Self {
        self.kernel_param = kernel_param;
        self
    }

    /// Parse from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the class count
    pub fn validate(&self) -> Result<()> {
        if self.nclasses < 2 {
            return Err(PerceptronError::InvalidConfiguration(format!(
                "nclasses must be at least 2, got {}",
                self.nclasses
            )));
        }
        Ok(())
    }
}

/// Parameters for the training loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Upper bound on the number of passes over the training set
    pub max_epochs: usize,
    /// Minimum epoch-over-epoch train error improvement required to continue
    pub tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_epochs: 100,
            tolerance: 1e-5,
        }
    }
}

impl TrainingConfig {
    /// Parse from a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Partial {
            max_epochs: Option<usize>,
            tolerance: Option<f64>,
        }

        let partial: Partial = serde_json::from_str(json)?;
        let defaults = Self::default();
        let config = Self {
            max_epochs: partial.max_epochs.unwrap_or(defaults.max_epochs),
            tolerance: partial.tolerance.unwrap_or(defaults.tolerance),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject zero epochs and negative or non-finite tolerances
    pub fn validate(&self) -> Result<()> {
        if self.max_epochs == 0 {
            return Err(PerceptronError::InvalidConfiguration(
                "max_epochs must be positive".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PerceptronError::InvalidConfiguration(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
