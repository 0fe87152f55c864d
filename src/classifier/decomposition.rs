//! Multi-class decomposition strategies
//!
//! A decomposition owns the mapping between classes and decision functions
//! (rows of the dual weight matrix): the mistake-driven update rule applied to
//! one training column, and the rule that turns a confidence vector into a
//! single class label.

use crate::core::ClassificationMethod;
use ndarray::{Array2, ArrayView1};
use std::fmt::Debug;

/// Decision-function layout and update/decision rules for one strategy
pub trait Decomposition: Debug + Send + Sync {
    /// Strategy implemented by this decomposition
    fn method(&self) -> ClassificationMethod;

    /// Number of classes
    fn nclasses(&self) -> usize;

    /// Number of decision functions (rows of the weight matrix)
    fn n_decision_functions(&self) -> usize;

    /// Apply the mistake rule for one training example
    ///
    /// `confidence` holds one value per decision function, `column` is the
    /// example's local training index. Returns the number of decision
    /// functions that made a mistake (each of which updated its weight).
    fn update(
        &self,
        confidence: ArrayView1<'_, f64>,
        label: usize,
        weights: &mut Array2<f64>,
        column: usize,
    ) -> usize;

    /// Resolve a confidence vector into a class label
    fn decide(&self, confidence: ArrayView1<'_, f64>) -> usize;

    /// Ordered class pairs, for pairwise strategies
    fn pairs(&self) -> Option<&[(usize, usize)]> {
        None
    }
}

/// Build the decomposition for `method`
pub fn for_method(method: ClassificationMethod, nclasses: usize) -> Box<dyn Decomposition> {
    match method {
        ClassificationMethod::OneVsAll => Box::new(OneVsAll::new(nclasses)),
        ClassificationMethod::OneVsOne => Box::new(OneVsOne::new(nclasses)),
    }
}

/// Index of the first maximum (0 when empty)
pub(crate) fn argmax<T, I>(values: I) -> usize
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    let mut values = values.into_iter().enumerate();
    let Some((_, mut best_value)) = values.next() else {
        return 0;
    };
    let mut best = 0;
    for (i, value) in values {
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    best
}

/// One decision function per class, "class c vs rest"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneVsAll {
    nclasses: usize,
}

impl OneVsAll {
    pub fn new(nclasses: usize) -> Self {
        Self { nclasses }
    }
}

impl Decomposition for OneVsAll {
    fn method(&self) -> ClassificationMethod {
        ClassificationMethod::OneVsAll
    }

    fn nclasses(&self) -> usize {
        self.nclasses
    }

    fn n_decision_functions(&self) -> usize {
        self.nclasses
    }

    fn update(
        &self,
        confidence: ArrayView1<'_, f64>,
        label: usize,
        weights: &mut Array2<f64>,
        column: usize,
    ) -> usize {
        let mut mistakes = 0;
        for (class, &value) in confidence.iter().enumerate() {
            if value > 0.0 && class != label {
                // false positive
                weights[[class, column]] -= 1.0;
                mistakes += 1;
            } else if value <= 0.0 && class == label {
                // false negative
                weights[[class, column]] += 1.0;
                mistakes += 1;
            }
        }
        mistakes
    }

    fn decide(&self, confidence: ArrayView1<'_, f64>) -> usize {
        argmax(confidence)
    }
}

/// One decision function per class pair `(a, b)`, `a < b`
///
/// Positive confidence favours `a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneVsOne {
    nclasses: usize,
    pairs: Vec<(usize, usize)>,
}

impl OneVsOne {
    pub fn new(nclasses: usize) -> Self {
        let pairs = (0..nclasses.saturating_sub(1))
            .flat_map(|a| (a + 1..nclasses).map(move |b| (a, b)))
            .collect();
        Self { nclasses, pairs }
    }

    /// Per-class vote tally for one confidence vector
    pub fn votes(&self, confidence: ArrayView1<'_, f64>) -> Vec<usize> {
        let mut votes = vec![0; self.nclasses];
        for (&(a, b), &value) in self.pairs.iter().zip(confidence) {
            if value > 0.0 {
                votes[a] += 1;
            } else {
                votes[b] += 1;
            }
        }
        votes
    }
}

impl Decomposition for OneVsOne {
    fn method(&self) -> ClassificationMethod {
        ClassificationMethod::OneVsOne
    }

    fn nclasses(&self) -> usize {
        self.nclasses
    }

    fn n_decision_functions(&self) -> usize {
        self.pairs.len()
    }

    fn update(
        &self,
        confidence: ArrayView1<'_, f64>,
        label: usize,
        weights: &mut Array2<f64>,
        column: usize,
    ) -> usize {
        let mut mistakes = 0;
        for (row, (&(a, b), &value)) in self.pairs.iter().zip(confidence).enumerate() {
            if label == a && value <= 0.0 {
                weights[[row, column]] += 1.0;
                mistakes += 1;
            }
            if label == b && value > 0.0 {
                weights[[row, column]] -= 1.0;
                mistakes += 1;
            }
        }
        mistakes
    }

    fn decide(&self, confidence: ArrayView1<'_, f64>) -> usize {
        argmax(self.votes(confidence))
    }

    fn pairs(&self) -> Option<&[(usize, usize)]> {
        Some(&self.pairs)
    }
}
