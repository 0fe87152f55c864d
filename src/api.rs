//! High-level API for kernel perceptron experiments
//!
//! This module computes the kernel matrix over the union of a training and a
//! test set, builds the classifier, trains it and exposes prediction and
//! evaluation on the result.
//!
//! # Quick Start
//!
//! ```rust
//! use kperceptron::api::Perceptron;
//! use kperceptron::{ClassificationMethod, KernelType, LabelledDataset};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let train = LabelledDataset::new(
//!     vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![-1.0, -1.0], vec![-1.0, -2.0]],
//!     vec![0, 0, 1, 1],
//! )?;
//! let test = LabelledDataset::new(vec![vec![1.5, 1.0], vec![-1.0, -1.5]], vec![0, 1])?;
//!
//! let fitted = Perceptron::new(2, KernelType::Polynomial { degree: 1 })
//!     .with_method(ClassificationMethod::OneVsOne)
//!     .with_max_epochs(50)
//!     .fit(&train, &test)?;
//!
//! assert_eq!(fitted.train_error(), 0.0);
//! println!("Test error: {:.2}%", fitted.model().test_error() * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::classifier::{EvaluationReport, KernelPerceptron, TrainingReport};
use crate::core::{ClassificationMethod, Dataset, PerceptronConfig, Result, TrainingConfig};
use crate::data::KernelIndex;
use crate::kernel::{cross_gram_matrix, gram_matrix, KernelType};
use std::sync::Arc;

/// Kernel perceptron experiment builder
#[derive(Debug, Clone)]
pub struct Perceptron {
    kernel: KernelType,
    config: PerceptronConfig,
    training: TrainingConfig,
}

impl Perceptron {
    /// Create a One-vs-All perceptron with default training settings
    pub fn new(nclasses: usize, kernel: KernelType) -> Self {
        Self {
            kernel,
            config: PerceptronConfig::new(nclasses).with_kernel_param(kernel.param()),
            training: TrainingConfig::default(),
        }
    }

    /// Set the multi-class decomposition
    pub fn with_method(mut self, method: ClassificationMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Set the maximum number of epochs
    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.training.max_epochs = max_epochs;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.training.tolerance = tolerance;
        self
    }

    /// Replace all training settings
    pub fn with_training_config(mut self, training: TrainingConfig) -> Self {
        self.training = training;
        self
    }

    /// Compute the kernel matrix over `train` followed by `test`, then train
    pub fn fit<D: Dataset + ?Sized>(self, train: &D, test: &D) -> Result<FittedPerceptron> {
        self.training.validate()?;
        self.kernel.validate()?;

        let points: Vec<Vec<f64>> = train.data().iter().chain(test.data()).cloned().collect();
        let kernel_matrix = Arc::new(gram_matrix(&self.kernel, &points)?);

        let mut model = KernelPerceptron::new(
            self.config,
            kernel_matrix,
            train,
            test,
            KernelIndex::contiguous(train.size(), test.size()),
        )?;
        let report = model.train_with_config(&self.training)?;

        Ok(FittedPerceptron {
            model,
            report,
            kernel: self.kernel,
            train_points: train.data().to_vec(),
        })
    }
}

/// Trained perceptron together with its training report
#[derive(Debug)]
pub struct FittedPerceptron {
    model: KernelPerceptron,
    report: TrainingReport,
    kernel: KernelType,
    train_points: Vec<Vec<f64>>,
}

impl FittedPerceptron {
    /// Final train error
    pub fn train_error(&self) -> f64 {
        self.report.train_error
    }

    /// Training report with per-epoch errors
    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// Kernel used to build the kernel matrix
    pub fn kernel(&self) -> KernelType {
        self.kernel
    }

    /// Underlying classifier
    pub fn model(&self) -> &KernelPerceptron {
        &self.model
    }

    /// Predict labels for the training set
    pub fn predict_train(&self) -> Result<Vec<usize>> {
        self.model.predict(self.model.kernel_index().train())
    }

    /// Predict labels for the held-out test set
    pub fn predict_test(&self) -> Vec<usize> {
        self.model.predict_test()
    }

    /// Predict labels for feature vectors that are not in the kernel matrix
    ///
    /// Kernel values against the training points are computed on the fly.
    pub fn predict_points(&self, points: &[Vec<f64>]) -> Result<Vec<usize>> {
        let block = cross_gram_matrix(&self.kernel, &self.train_points, points)?;
        self.model.predict_block(&block)
    }

    /// Evaluation summary on the test set
    pub fn evaluate(&self) -> EvaluationReport {
        self.model.evaluate()
    }

    /// Release the classifier
    pub fn into_model(self) -> KernelPerceptron {
        self.model
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Train with default settings and return the test error
    pub fn test_error<D: Dataset + ?Sized>(
        train: &D,
        test: &D,
        nclasses: usize,
        kernel: KernelType,
        method: ClassificationMethod,
    ) -> Result<f64> {
        let fitted = Perceptron::new(nclasses, kernel)
            .with_method(method)
            .fit(train, test)?;
        Ok(fitted.model().test_error())
    }

    /// Train and evaluate both decompositions on the same split
    pub fn compare_methods<D: Dataset + ?Sized>(
        train: &D,
        test: &D,
        nclasses: usize,
        kernel: KernelType,
    ) -> Result<(EvaluationReport, EvaluationReport)> {
        let ova = Perceptron::new(nclasses, kernel)
            .with_method(ClassificationMethod::OneVsAll)
            .fit(train, test)?;
        let ovo = Perceptron::new(nclasses, kernel)
            .with_method(ClassificationMethod::OneVsOne)
            .fit(train, test)?;
        Ok((ova.evaluate(), ovo.evaluate()))
    }
}
