//! Precomputed kernel (Gram) matrices
//!
//! The kernel matrix is computed once over the union of training and test
//! points and then only looked up by global index.

use crate::core::{PerceptronError, Result};
use crate::kernel::Kernel;
use log::debug;
use ndarray::Array2;

/// Kernel matrix indexed by global point index
pub type KernelMatrix = Array2<f64>;

/// Compute the symmetric Gram matrix `K[i][j] = k(points[i], points[j])`
pub fn gram_matrix<K: Kernel + ?Sized>(kernel: &K, points: &[Vec<f64>]) -> Result<KernelMatrix> {
    check_dimensions(points, points.first().map_or(0, Vec::len))?;

    let n = points.len();
    let mut matrix = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let value = kernel.compute(&points[i], &points[j]);
            matrix[[i, j]] = value;
            matrix[[j, i]] = value;
        }
    }

    debug!("Computed {n}x{n} Gram matrix");
    Ok(matrix)
}

/// Compute the rectangular matrix `K[i][j] = k(rows[i], cols[j])`
pub fn cross_gram_matrix<K: Kernel + ?Sized>(
    kernel: &K,
    rows: &[Vec<f64>],
    cols: &[Vec<f64>],
) -> Result<KernelMatrix> {
    let dim = rows.first().or(cols.first()).map_or(0, Vec::len);
    check_dimensions(rows, dim)?;
    check_dimensions(cols, dim)?;

    let matrix = Array2::from_shape_fn((rows.len(), cols.len()), |(i, j)| {
        kernel.compute(&rows[i], &cols[j])
    });

    debug!("Computed {}x{} cross kernel matrix", rows.len(), cols.len());
    Ok(matrix)
}

/// Check whether a kernel matrix is square and symmetric within `tolerance`
pub fn is_symmetric(matrix: &KernelMatrix, tolerance: f64) -> bool {
    matrix.is_square()
        && matrix
            .indexed_iter()
            .all(|((i, j), &value)| (value - matrix[[j, i]]).abs() <= tolerance)
}

fn check_dimensions(points: &[Vec<f64>], dim: usize) -> Result<()> {
    match points.iter().find(|p| p.len() != dim) {
        Some(p) => Err(PerceptronError::DimensionMismatch {
            expected: dim,
            actual: p.len(),
        }),
        None => Ok(()),
    }
}
