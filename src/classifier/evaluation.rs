//! Held-out evaluation: test error, confusion matrix and per-point mistake counts

use crate::classifier::KernelPerceptron;
use crate::core::{ClassificationMethod, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

impl KernelPerceptron {
    /// Fraction of test points whose prediction differs from the label
    ///
    /// An empty test set has zero error.
    pub fn test_error(&self) -> f64 {
        self.error_rate(&self.predict_test())
    }

    /// Row-normalised misclassification matrix
    ///
    /// Cell `(y, ŷ)` is the fraction of test points of true class `y` that
    /// were predicted as `ŷ ≠ y`. The diagonal is always zero; rows of classes
    /// absent from the test set stay zero.
    pub fn confusion_matrix(&self) -> Array2<f64> {
        self.confusion_from(&self.predict_test())
    }

    /// Mistake count per global kernel-matrix index
    ///
    /// The vector has one slot per kernel-matrix row; each misclassified test
    /// point increments the slot of its global index.
    pub fn count_mistake_vec(&self) -> Vec<usize> {
        let mut counts = vec![0; self.kernel_matrix.nrows()];
        let predictions = self.predict_test();

        for ((&global, &label), predicted) in self
            .index
            .test()
            .iter()
            .zip(&self.test_labels)
            .zip(predictions)
        {
            if predicted != label {
                counts[global] += 1;
            }
        }
        counts
    }

    /// Summary of the classifier's performance on the test set
    pub fn evaluate(&self) -> EvaluationReport {
        let predictions = self.predict_test();
        let test_error = self.error_rate(&predictions);

        EvaluationReport {
            method: self.method(),
            nclasses: self.nclasses(),
            test_size: self.test_size(),
            mistakes: self.mistakes_in(&predictions),
            test_error,
            accuracy: if self.test_size() == 0 {
                0.0
            } else {
                1.0 - test_error
            },
            confusion_matrix: self
                .confusion_from(&predictions)
                .outer_iter()
                .map(|row| row.to_vec())
                .collect(),
        }
    }

    fn mistakes_in(&self, predictions: &[usize]) -> usize {
        predictions
            .iter()
            .zip(&self.test_labels)
            .filter(|(predicted, label)| predicted != label)
            .count()
    }

    fn error_rate(&self, predictions: &[usize]) -> f64 {
        if self.test_size() == 0 {
            return 0.0;
        }
        self.mistakes_in(predictions) as f64 / self.test_size() as f64
    }

    fn confusion_from(&self, predictions: &[usize]) -> Array2<f64> {
        let nclasses = self.nclasses();
        let mut matrix = Array2::zeros((nclasses, nclasses));
        let mut class_counts = vec![0usize; nclasses];

        for (&label, &predicted) in self.test_labels.iter().zip(predictions) {
            class_counts[label] += 1;
            if predicted != label {
                matrix[[label, predicted]] += 1.0;
            }
        }

        for (mut row, &count) in matrix.outer_iter_mut().zip(&class_counts) {
            if count > 0 {
                row /= count as f64;
            }
        }
        matrix
    }
}

/// Serializable evaluation summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub method: ClassificationMethod,
    pub nclasses: usize,
    pub test_size: usize,
    /// Number of misclassified test points
    pub mistakes: usize,
    pub test_error: f64,
    pub accuracy: f64,
    /// Row-normalised misclassification matrix, see [`KernelPerceptron::confusion_matrix`]
    pub confusion_matrix: Vec<Vec<f64>>,
}

impl EvaluationReport {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
