use nalgebra::{DMatrix, DVector};
use crate::error::{Result, WhittakerError};
use crate::penalty::{binomial_row, penalty_matrix};
use crate::system::system_matrix;

/// Configuration for the Whittaker-Eilers smoother.
#[derive(Debug, Clone, PartialEq)]
pub struct SmootherConfig {
    /// Smoothing weight; larger values give smoother output
    pub lambda: f64,
    /// Order of the finite differences used as roughness penalty
    pub order: usize,
    /// Per-sample spacing; `None` means unit spacing
    pub spacing: Option<Vec<f64>>,
}

impl SmootherConfig {
    /// Creates a new smoother configuration with validation
    pub fn new(lambda: f64, order: usize) -> Result<Self> {
        if order < 1 {
            return Err(WhittakerError::InvalidOrder(order));
        }

        Ok(Self {
            lambda,
            order,
            spacing: None,
        })
    }

    /// Sets the smoothing weight
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets per-sample spacing for non-uniformly sampled data
    pub fn with_spacing(mut self, spacing: Vec<f64>) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

/// Condition numbers above this make the solve unreliable.
pub const MAX_CONDITION: f64 = 1e16;

/// A Whittaker-Eilers smoother.
///
/// Holds only its configuration, so one instance can be shared across
/// threads and reused for any number of independent inputs.
#[derive(Debug, Clone)]
pub struct WhittakerSmoother {
    config: SmootherConfig,
}

impl WhittakerSmoother {
    /// Creates a smoother with the given smoothing weight and difference order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use whittaker_eilers::WhittakerSmoother;
    ///
    /// let smoother = WhittakerSmoother::new(20.0, 2).expect("Valid parameters");
    /// ```
    pub fn new(lambda: f64, order: usize) -> Result<Self> {
        let config = SmootherConfig::new(lambda, order)?;
        Ok(Self { config })
    }

    /// Creates a smoother with custom configuration
    pub fn with_config(config: SmootherConfig) -> Self {
        Self { config }
    }

    /// Sets per-sample spacing
    pub fn with_spacing(mut self, spacing: Vec<f64>) -> Self {
        self.config.spacing = Some(spacing);
        self
    }

    /// Smooths `data` with this smoother's configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use whittaker_eilers::WhittakerSmoother;
    ///
    /// let data = vec![1.1, 1.9, 3.1, 3.91, 5.0, 6.02, 7.01, 7.7, 9.0, 10.0];
    /// let smoother = WhittakerSmoother::new(20.0, 2).expect("Valid parameters");
    /// let smoothed = smoother.smooth(&data).expect("Smoothing failed");
    /// assert_eq!(smoothed.len(), data.len());
    /// ```
    pub fn smooth(&self, data: &[f64]) -> Result<Vec<f64>> {
        smooth(
            data,
            self.config.lambda,
            self.config.order,
            self.config.spacing.as_deref(),
        )
    }

    /// Returns the smoother configuration
    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }
}

/// Runs the full Whittaker-Eilers pipeline on `data`.
///
/// Solves `(I + lambda * D^T D) x = data` where `D` is the spacing-adjusted
/// penalty matrix of the given order. Negative `lambda` is passed through
/// unchanged and may yield an ill-posed system.
///
/// # Arguments
///
/// * `data` - The input sequence
/// * `lambda` - Smoothing weight
/// * `order` - Difference order (at least 1, at most `data.len()`)
/// * `spacing` - Per-sample spacing, or `None`/empty for unit spacing
///
/// # Returns
///
/// The smoothed sequence, same length and order as `data`. Singular or
/// numerically degenerate systems fail with `SolveFailure`.
///
/// # Example
///
/// ```rust
/// use whittaker_eilers::smooth;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];
/// let smoothed = smooth(&data, 10.0, 2, None).unwrap();
/// assert_eq!(smoothed.len(), data.len());
/// ```
pub fn smooth(
    data: &[f64],
    lambda: f64,
    order: usize,
    spacing: Option<&[f64]>,
) -> Result<Vec<f64>> {
    let n = data.len();

    if lambda < 0.0 {
        log::warn!("negative lambda {} may produce an ill-posed system", lambda);
    }

    let unit_spacing;
    let spacing = match spacing {
        Some(s) if !s.is_empty() => s,
        _ => {
            unit_spacing = vec![1.0; n];
            &unit_spacing[..]
        }
    };

    let penalty = penalty_matrix(n, spacing, order)
        .map_err(|e| WhittakerError::PenaltyMatrix(Box::new(e)))?;

    let system = system_matrix(&penalty, lambda);
    let rhs = DVector::from_column_slice(data);

    log::debug!(
        "solving {}x{} system (order {}, lambda {})",
        n, n, order, lambda
    );

    check_conditioning(&system)?;

    let solution = system.lu().solve(&rhs).ok_or_else(|| {
        WhittakerError::SolveFailure(format!(
            "LU decomposition of the {}x{} system matrix is singular",
            n, n
        ))
    })?;

    if let Some(index) = solution.iter().position(|x| !x.is_finite()) {
        return Err(WhittakerError::SolveFailure(format!(
            "non-finite solution value {} at index {}",
            solution[index], index
        )));
    }

    Ok(solution.iter().copied().collect())
}

/// Rejects system matrices too ill-conditioned for a meaningful solve.
///
/// The matrix counts as degenerate when its condition number (largest over
/// smallest singular value) is not finite or exceeds [`MAX_CONDITION`], or
/// when the smallest singular value is at most `n * EPSILON` times the
/// largest.
fn check_conditioning(system: &DMatrix<f64>) -> Result<()> {
    if let Some(bad) = system.iter().find(|v| !v.is_finite()) {
        return Err(WhittakerError::SolveFailure(format!(
            "system matrix contains non-finite entry {}",
            bad
        )));
    }

    let singular_values = system.singular_values();
    let largest = singular_values.max();
    let smallest = singular_values.min();
    let condition = largest / smallest;
    let rank_tolerance = largest * system.nrows() as f64 * f64::EPSILON;

    if !condition.is_finite() || condition > MAX_CONDITION || smallest <= rank_tolerance {
        return Err(WhittakerError::SolveFailure(format!(
            "system matrix is numerically singular (condition number {:.3e})",
            condition
        )));
    }

    log::trace!("system condition number {:.3e}", condition);
    Ok(())
}

/// Sum of squared `order`-th finite differences of `data` at unit spacing.
///
/// A smoother sequence has a smaller roughness; for fixed data and order it
/// never grows as lambda increases.
pub fn roughness(data: &[f64], order: usize) -> Result<f64> {
    if order < 1 {
        return Err(WhittakerError::InvalidOrder(order));
    }
    if data.len() < order {
        return Err(WhittakerError::InsufficientData(data.len(), order));
    }

    let binomials = binomial_row(order);
    let total: f64 = data
        .windows(order + 1)
        .map(|window| {
            let diff: f64 = window
                .iter()
                .zip(binomials.iter())
                .enumerate()
                .map(|(j, (x, c))| if j % 2 == 0 { c * x } else { -c * x })
                .sum();
            diff * diff
        })
        .sum();

    Ok(total)
}

/// Derives per-sample spacing from strictly increasing sample positions.
///
/// `spacing[i]` is the gap to the previous sample; the first sample takes
/// the gap to its successor.
pub fn spacing_from_positions(positions: &[f64]) -> Result<Vec<f64>> {
    match positions.len() {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![1.0]),
        _ => {}
    }

    let mut spacing = Vec::with_capacity(positions.len());
    for (i, pair) in positions.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if !gap.is_finite() || gap <= 0.0 {
            return Err(WhittakerError::InvalidSpacing(i + 1, gap));
        }
        if i == 0 {
            spacing.push(gap);
        }
        spacing.push(gap);
    }

    Ok(spacing)
}
