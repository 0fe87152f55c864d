//! Kernel perceptron state, construction and prediction

use crate::classifier::decomposition::{self, Decomposition};
use crate::core::{ClassificationMethod, Dataset, PerceptronConfig, PerceptronError, Result};
use crate::data::{check_bounds, KernelIndex};
use crate::kernel::KernelMatrix;
use log::info;
use ndarray::{Array2, Axis};
use std::sync::Arc;

/// Multi-class kernel perceptron trained against a precomputed kernel matrix
///
/// The classifier keeps a dual weight matrix of shape
/// `(n_decision_functions, train_size)`: one row per decision function and one
/// column per training example. All weights start at zero and only the
/// training loop mutates them.
#[derive(Debug)]
pub struct KernelPerceptron {
    pub(crate) kernel_matrix: Arc<KernelMatrix>,
    pub(crate) index: KernelIndex,
    pub(crate) train_labels: Vec<usize>,
    pub(crate) test_labels: Vec<usize>,
    pub(crate) kernel_param: f64,
    pub(crate) decomposition: Box<dyn Decomposition>,
    pub(crate) weights: Array2<f64>,
}

impl KernelPerceptron {
    /// Create an untrained classifier
    ///
    /// # Arguments
    /// * `config` - class count, kernel hyperparameter and decomposition
    /// * `kernel_matrix` - Gram matrix covering all training and test points
    /// * `train` / `test` - datasets; only their sizes and labels are kept
    /// * `index` - global kernel-matrix indices of the training and test examples
    ///
    /// # Errors
    /// `InvalidConfiguration` for fewer than two classes or an empty training
    /// set; `InvalidLabel`, `DimensionMismatch` or `IndexOutOfBounds` when the
    /// datasets, index maps and kernel matrix do not line up.
    pub fn new<D: Dataset + ?Sized>(
        config: PerceptronConfig,
        kernel_matrix: Arc<KernelMatrix>,
        train: &D,
        test: &D,
        index: KernelIndex,
    ) -> Result<Self> {
        config.validate()?;

        if train.is_empty() {
            return Err(PerceptronError::InvalidConfiguration(
                "training set must not be empty".to_string(),
            ));
        }

        check_labels(train.labels(), config.nclasses)?;
        check_labels(test.labels(), config.nclasses)?;

        // Every index is used both as a row and as a column.
        let kernel_dim = kernel_matrix.nrows().min(kernel_matrix.ncols());
        index.validate(train.size(), test.size(), kernel_dim)?;

        let decomposition = decomposition::for_method(config.method, config.nclasses);
        let weights = Array2::zeros((decomposition.n_decision_functions(), train.size()));

        info!(
            "Created {} kernel perceptron: {} classes, {} decision functions, {} training / {} test examples",
            config.method,
            config.nclasses,
            decomposition.n_decision_functions(),
            train.size(),
            test.size()
        );

        Ok(Self {
            kernel_matrix,
            index,
            train_labels: train.labels().to_vec(),
            test_labels: test.labels().to_vec(),
            kernel_param: config.kernel_param,
            decomposition,
            weights,
        })
    }

    /// Number of classes
    pub fn nclasses(&self) -> usize {
        self.decomposition.nclasses()
    }

    /// Decomposition strategy
    pub fn method(&self) -> ClassificationMethod {
        self.decomposition.method()
    }

    /// Kernel hyperparameter recorded at construction
    pub fn kernel_param(&self) -> f64 {
        self.kernel_param
    }

    /// Number of decision functions (weight matrix rows)
    pub fn n_decision_functions(&self) -> usize {
        self.decomposition.n_decision_functions()
    }

    /// Number of training examples (weight matrix columns)
    pub fn train_size(&self) -> usize {
        self.train_labels.len()
    }

    /// Number of held-out test examples
    pub fn test_size(&self) -> usize {
        self.test_labels.len()
    }

    /// Dual weight matrix
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Ordered `(a, b)` class pairs for One-vs-One, `None` for One-vs-All
    pub fn pair_index(&self) -> Option<&[(usize, usize)]> {
        self.decomposition.pairs()
    }

    /// Train/test index maps
    pub fn kernel_index(&self) -> &KernelIndex {
        &self.index
    }

    /// Shared kernel matrix
    pub fn kernel_matrix(&self) -> &KernelMatrix {
        &self.kernel_matrix
    }

    /// Zero all weights, returning the classifier to its untrained state
    pub fn reset(&mut self) {
        self.weights.fill(0.0);
    }

    /// Confidences for the given global kernel-matrix columns
    ///
    /// Returns `weights · K[train, points]`, shape `(n_decision_functions, points.len())`.
    pub fn decision_values(&self, points: &[usize]) -> Result<Array2<f64>> {
        check_bounds(points, self.kernel_matrix.ncols())?;
        Ok(self.weights.dot(&self.kernel_block(points)))
    }

    /// Predict class labels for the given global kernel-matrix columns
    pub fn predict(&self, points: &[usize]) -> Result<Vec<usize>> {
        check_bounds(points, self.kernel_matrix.ncols())?;
        Ok(self.decide_block(&self.kernel_block(points)))
    }

    /// Predict class labels from an explicit kernel block
    ///
    /// `block[[j, p]]` must be the kernel value between training example `j`
    /// and point `p`, so the block has `train_size()` rows and one column per point.
    pub fn predict_block(&self, block: &Array2<f64>) -> Result<Vec<usize>> {
        if block.nrows() != self.train_size() {
            return Err(PerceptronError::DimensionMismatch {
                expected: self.train_size(),
                actual: block.nrows(),
            });
        }

        Ok(self.decide_block(block))
    }

    /// Predict class labels for the held-out test set
    pub fn predict_test(&self) -> Vec<usize> {
        self.decide_block(&self.kernel_block(self.index.test()))
    }

    /// `K[train, points]`, one row per training example
    pub(crate) fn kernel_block(&self, points: &[usize]) -> Array2<f64> {
        self.kernel_matrix
            .select(Axis(1), points)
            .select(Axis(0), self.index.train())
    }

    fn decide_block(&self, block: &Array2<f64>) -> Vec<usize> {
        self.weights
            .dot(block)
            .axis_iter(Axis(1))
            .map(|confidence| self.decomposition.decide(confidence))
            .collect()
    }
}

fn check_labels(labels: &[usize], nclasses: usize) -> Result<()> {
    match labels.iter().find(|&&label| label >= nclasses) {
        Some(&label) => Err(PerceptronError::InvalidLabel { label, nclasses }),
        None => Ok(()),
    }
}
