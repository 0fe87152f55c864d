//! Dense labelled dataset

use crate::core::{Dataset, PerceptronError, Result};

/// Dense feature vectors with integer class labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelledDataset {
    data: Vec<Vec<f64>>,
    labels: Vec<usize>,
}

impl LabelledDataset {
    /// Create a dataset from parallel feature and label sequences
    ///
    /// All feature vectors must have the same dimensionality.
    pub fn new(data: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self> {
        if data.len() != labels.len() {
            return Err(PerceptronError::DimensionMismatch {
                expected: data.len(),
                actual: labels.len(),
            });
        }

        if let Some(first) = data.first() {
            let dim = first.len();
            if let Some(bad) = data.iter().find(|x| x.len() != dim) {
                return Err(PerceptronError::DimensionMismatch {
                    expected: dim,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { data, labels })
    }

    /// Create an empty dataset
    pub fn empty() -> Self {
        Self::default()
    }

    /// Feature dimensionality (0 for an empty dataset)
    pub fn dim(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    /// Largest label plus one
    pub fn n_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&max| max + 1)
    }

    /// Concatenate the feature vectors of `self` followed by `other`
    ///
    /// This is the point order used when one kernel matrix covers both a
    /// training and a test set.
    pub fn concat_points(&self, other: &Self) -> Vec<Vec<f64>> {
        self.data.iter().chain(&other.data).cloned().collect()
    }
}

impl Dataset for LabelledDataset {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    fn labels(&self) -> &[usize] {
        &self.labels
    }
}
