use nalgebra::DMatrix;
use crate::error::{Result, WhittakerError};

/// Computes row `order` of Pascal's triangle.
///
/// The returned vector has `order + 1` entries, `C(order, 0)` through
/// `C(order, order)`. Built iteratively, so it stays cheap for any order.
pub fn binomial_row(order: usize) -> Vec<f64> {
    let mut row = vec![1.0; order + 1];
    for k in 1..order {
        // Walk backwards so each entry still sees the previous row's value
        for j in (1..=k).rev() {
            row[j] += row[j - 1];
        }
    }
    row
}

/// Builds the spacing-adjusted finite-difference penalty matrix.
///
/// Row `i` holds the `order`-th difference coefficients at columns
/// `i..=i + order`. Column offset `j` gets `C(order, j) * (-1)^j`, and the
/// interior offsets (`0 < j < order`) are further scaled by
/// `spacing[i + j - 1] / spacing[i + j]`.
///
/// # Arguments
///
/// * `data_len` - Number of samples `n`
/// * `spacing` - Per-sample spacing, must have length `n`
/// * `order` - Difference order `d` (at least 1, at most `n`)
///
/// Only `spacing[..n - 1]` enters the interior ratios, and only for
/// `order > 1` with at least one row; those entries must be finite and
/// strictly positive. Entries that are never read are not checked.
///
/// # Returns
///
/// An `(n - d) x n` dense matrix
pub fn penalty_matrix(data_len: usize, spacing: &[f64], order: usize) -> Result<DMatrix<f64>> {
    if order < 1 {
        return Err(WhittakerError::InvalidOrder(order));
    }

    if spacing.len() != data_len {
        return Err(WhittakerError::SpacingLengthMismatch(spacing.len(), data_len));
    }

    if data_len < order {
        return Err(WhittakerError::InsufficientData(data_len, order));
    }

    let rows = data_len - order;
    if order > 1 && rows > 0 {
        validate_spacing(&spacing[..data_len - 1])?;
    }

    let binomials = binomial_row(order);
    let mut penalty = DMatrix::<f64>::zeros(rows, data_len);

    for i in 0..rows {
        for (j, &binomial) in binomials.iter().enumerate() {
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            let mut coeff = sign * binomial;
            if j > 0 && j < order {
                coeff *= spacing[i + j - 1] / spacing[i + j];
            }
            penalty[(i, i + j)] = coeff;
        }
    }

    log::trace!("built {}x{} penalty matrix for order {}", rows, data_len, order);

    Ok(penalty)
}

/// Checks every given spacing entry is finite and strictly positive.
fn validate_spacing(spacing: &[f64]) -> Result<()> {
    match spacing.iter().position(|s| !s.is_finite() || *s <= 0.0) {
        Some(index) => Err(WhittakerError::InvalidSpacing(index, spacing[index])),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_binomial_rows() {
        assert_eq!(binomial_row(0), vec![1.0]);
        assert_eq!(binomial_row(1), vec![1.0, 1.0]);
        assert_eq!(binomial_row(2), vec![1.0, 2.0, 1.0]);
        assert_eq!(binomial_row(3), vec![1.0, 3.0, 3.0, 1.0]);
        assert_eq!(binomial_row(6), vec![1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0]);
    }

    #[test]
    fn test_second_order_unit_spacing() {
        let spacing = vec![1.0; 5];
        let d = penalty_matrix(5, &spacing, 2).unwrap();

        assert_eq!(d.nrows(), 3);
        assert_eq!(d.ncols(), 5);

        let expected = DMatrix::from_row_slice(3, 5, &[
            1.0, -2.0, 1.0, 0.0, 0.0,
            0.0, 1.0, -2.0, 1.0, 0.0,
            0.0, 0.0, 1.0, -2.0, 1.0,
        ]);
        assert_eq!(d, expected);
    }

    #[test]
    fn test_third_order_row_signs() {
        let spacing = vec![1.0; 4];
        let d = penalty_matrix(4, &spacing, 3).unwrap();

        assert_eq!(d.nrows(), 1);
        let row: Vec<f64> = d.row(0).iter().copied().collect();
        assert_eq!(row, vec![1.0, -3.0, 3.0, -1.0]);
    }

    #[test]
    fn test_spacing_scales_interior_terms_only() {
        let spacing = vec![1.0, 2.0, 4.0, 1.0];
        let d = penalty_matrix(4, &spacing, 2).unwrap();

        // Row 0: interior term uses spacing[0] / spacing[1]
        assert_abs_diff_eq!(d[(0, 0)], 1.0);
        assert_abs_diff_eq!(d[(0, 1)], -2.0 * 0.5);
        assert_abs_diff_eq!(d[(0, 2)], 1.0);

        // Row 1: interior term uses spacing[1] / spacing[2]
        assert_abs_diff_eq!(d[(1, 1)], 1.0);
        assert_abs_diff_eq!(d[(1, 2)], -2.0 * 0.5);
        assert_abs_diff_eq!(d[(1, 3)], 1.0);
        assert_abs_diff_eq!(d[(1, 0)], 0.0);
    }

    #[test]
    fn test_first_order_ignores_spacing() {
        let spacing = vec![3.0, 0.5, 7.0];
        let d = penalty_matrix(3, &spacing, 1).unwrap();
        let expected = DMatrix::from_row_slice(2, 3, &[
            1.0, -1.0, 0.0,
            0.0, 1.0, -1.0,
        ]);
        assert_eq!(d, expected);
    }

    #[test]
    fn test_order_equal_to_length_gives_empty_matrix() {
        let d = penalty_matrix(3, &[1.0; 3], 3).unwrap();
        assert_eq!(d.nrows(), 0);
        assert_eq!(d.ncols(), 3);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            penalty_matrix(5, &[1.0; 5], 0),
            Err(WhittakerError::InvalidOrder(0))
        );
        assert_eq!(
            penalty_matrix(5, &[1.0; 4], 2),
            Err(WhittakerError::SpacingLengthMismatch(4, 5))
        );
        assert_eq!(
            penalty_matrix(2, &[1.0; 2], 3),
            Err(WhittakerError::InsufficientData(2, 3))
        );
        assert_eq!(
            penalty_matrix(3, &[1.0, 0.0, 1.0], 2),
            Err(WhittakerError::InvalidSpacing(1, 0.0))
        );
        assert!(penalty_matrix(3, &[1.0, f64::NAN, 1.0], 2).is_err());
    }

    #[test]
    fn test_unread_spacing_entries_accepted() {
        // First order never reads spacing
        assert!(penalty_matrix(3, &[0.0, -1.0, f64::NAN], 1).is_ok());
        // The last entry is never part of an interior ratio
        assert!(penalty_matrix(4, &[1.0, 2.0, 1.0, 0.0], 2).is_ok());
        assert!(penalty_matrix(5, &[1.0, 1.0, 1.0, 1.0, -3.0], 3).is_ok());
        // No rows, nothing read
        assert!(penalty_matrix(2, &[0.0, 0.0], 2).is_ok());
        // The second to last entry is read
        assert_eq!(
            penalty_matrix(4, &[1.0, 2.0, 0.0, 1.0], 2),
            Err(WhittakerError::InvalidSpacing(2, 0.0))
        );
    }

    #[test]
    fn test_validation_order() {
        // Order is checked before spacing length
        assert_eq!(
            penalty_matrix(5, &[1.0], 0),
            Err(WhittakerError::InvalidOrder(0))
        );
        // Spacing length is checked before data length
        assert_eq!(
            penalty_matrix(10, &[1.0], 13),
            Err(WhittakerError::SpacingLengthMismatch(1, 10))
        );
    }
}
