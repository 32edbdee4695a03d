use nalgebra::DMatrix;

/// Assembles the Whittaker-Eilers system matrix `I + lambda * D^T D`.
///
/// The Gram product `D^T D` is symmetric positive-semidefinite, so for
/// `lambda >= 0` the identity term keeps the result strictly
/// positive-definite. Shapes are taken from `penalty` as built by
/// [`penalty_matrix`](crate::penalty_matrix).
///
/// # Arguments
///
/// * `penalty` - The `(n - d) x n` penalty matrix
/// * `lambda` - Smoothing weight
///
/// # Returns
///
/// The `n x n` system matrix
pub fn system_matrix(penalty: &DMatrix<f64>, lambda: f64) -> DMatrix<f64> {
    let n = penalty.ncols();

    // No difference rows (n == order): nothing to penalise
    if penalty.nrows() == 0 {
        return DMatrix::identity(n, n);
    }

    let mut system = penalty.transpose() * penalty;
    system *= lambda;
    for i in 0..n {
        system[(i, i)] += 1.0;
    }

    system
}
