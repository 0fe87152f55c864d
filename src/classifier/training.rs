//! Online mistake-driven training
//!
//! Each epoch visits the training examples in index order. For example `i` the
//! confidence vector is `weights · K[train, train[i]]`; the decomposition then
//! adjusts column `i` of the weights for every decision function that got the
//! example wrong. Updates are visible to the very next example.
//!
//! After every epoch the train error (decision-function mistakes divided by
//! the training set size) and the test error are compared against the
//! previous epoch. Training stops when the train error improved by less than
//! the tolerance, or when the test error grew by more than
//! `1000 * tolerance`. The weights are left as they are at that point.

use crate::classifier::KernelPerceptron;
use crate::core::{Result, TrainingConfig};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiple of the tolerance the test error may grow by before training stops
const TEST_REGRESSION_FACTOR: f64 = 1e3;

/// Why the training loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Train error improved by less than the tolerance
    Converged,
    /// Test error rose above the previous epoch's by more than the allowed margin
    TestErrorRegression,
    /// The epoch budget ran out
    MaxEpochs,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::TestErrorRegression => write!(f, "test error regression"),
            Self::MaxEpochs => write!(f, "max epochs reached"),
        }
    }
}

/// Errors observed after one epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// 1-based epoch number
    pub epoch: usize,
    /// Decision-function-level mistakes made during the epoch
    pub mistakes: usize,
    pub train_error: f64,
    pub test_error: f64,
}

/// Outcome of a training run, including the per-epoch error curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Train error of the last epoch run
    pub train_error: f64,
    pub epochs_run: usize,
    pub stop_reason: StopReason,
    pub history: Vec<EpochRecord>,
}

impl TrainingReport {
    /// Train error per epoch
    pub fn train_errors(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.train_error).collect()
    }

    /// Test error per epoch
    pub fn test_errors(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.test_error).collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl KernelPerceptron {
    /// Train for at most `max_epochs` epochs and return the final train error
    ///
    /// # Errors
    /// `InvalidConfiguration` if `max_epochs` is zero or the tolerance is
    /// negative or not finite.
    pub fn train(&mut self, max_epochs: usize, tolerance: f64) -> Result<f64> {
        Ok(self.train_with_report(max_epochs, tolerance)?.train_error)
    }

    /// Train using the settings of a `TrainingConfig`
    pub fn train_with_config(&mut self, config: &TrainingConfig) -> Result<TrainingReport> {
        self.train_with_report(config.max_epochs, config.tolerance)
    }

    /// Train and return the full report with per-epoch errors
    pub fn train_with_report(&mut self, max_epochs: usize, tolerance: f64) -> Result<TrainingReport> {
        TrainingConfig {
            max_epochs,
            tolerance,
        }
        .validate()?;

        let train_size = self.train_size();
        let train_block = self.kernel_block(self.index.train());
        let mut history = Vec::new();
        let mut prev_train_error = f64::INFINITY;
        let mut prev_test_error = f64::INFINITY;

        info!(
            "Training {} kernel perceptron on {} examples (max_epochs={}, tolerance={})",
            self.method(),
            train_size,
            max_epochs,
            tolerance
        );

        for epoch in 1..=max_epochs {
            let mut mistakes = 0;
            for (i, &label) in self.train_labels.iter().enumerate() {
                let confidence = self.weights.dot(&train_block.column(i));
                mistakes += self
                    .decomposition
                    .update(confidence.view(), label, &mut self.weights, i);
            }

            let train_error = mistakes as f64 / train_size as f64;
            let test_error = self.test_error();
            history.push(EpochRecord {
                epoch,
                mistakes,
                train_error,
                test_error,
            });

            debug!(
                "Epoch {epoch}: mistakes={mistakes}, train_error={train_error:.6}, test_error={test_error:.6}"
            );

            let stop_reason = if prev_train_error - train_error < tolerance {
                Some(StopReason::Converged)
            } else if test_error > prev_test_error + TEST_REGRESSION_FACTOR * tolerance {
                Some(StopReason::TestErrorRegression)
            } else {
                None
            };

            if let Some(stop_reason) = stop_reason {
                info!("Training stopped after {epoch} epochs ({stop_reason}), train_error={train_error:.6}");
                return Ok(TrainingReport {
                    train_error,
                    epochs_run: epoch,
                    stop_reason,
                    history,
                });
            }

            prev_train_error = train_error;
            prev_test_error = test_error;
        }

        let train_error = history.last().map_or(0.0, |r| r.train_error);
        warn!("Training did not converge within {max_epochs} epochs, train_error={train_error:.6}");

        Ok(TrainingReport {
            train_error,
            epochs_run: max_epochs,
            stop_reason: StopReason::MaxEpochs,
            history,
        })
    }
}
