//! Core traits for the kernel perceptron

/// Labelled dataset abstraction
///
/// The classifier only relies on the size and the integer labels; feature
/// vectors are needed by whoever builds the kernel matrix.
pub trait Dataset {
    /// Number of samples in the dataset
    fn size(&self) -> usize;

    /// Feature vectors in natural index order
    fn data(&self) -> &[Vec<f64>];

    /// Class labels, parallel to `data()`
    fn labels(&self) -> &[usize];

    /// Get a single feature vector by index
    ///
    /// # Panics
    /// Panics if index >= size()
    fn features(&self, i: usize) -> &[f64] {
        &self.data()[i]
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of samples per class for classes `0..nclasses`
    ///
    /// Labels outside the range are ignored.
    fn class_counts(&self, nclasses: usize) -> Vec<usize> {
        let mut counts = vec![0; nclasses];
        for &label in self.labels() {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
        }
        counts
    }
}
