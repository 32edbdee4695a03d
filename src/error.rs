use std::fmt;

/// Error types for Whittaker-Eilers smoothing operations
#[derive(Debug, Clone, PartialEq)]
pub enum WhittakerError {
    /// Difference order must be at least 1
    InvalidOrder(usize),
    /// Spacing length differs from data length (spacing_len, data_len)
    SpacingLengthMismatch(usize, usize),
    /// Input data is shorter than the difference order (data_len, order)
    InsufficientData(usize, usize),
    /// Spacing entry that is not finite and strictly positive (index, value)
    InvalidSpacing(usize, f64),
    /// The penalty matrix could not be built
    PenaltyMatrix(Box<WhittakerError>),
    /// The assembled linear system could not be solved
    SolveFailure(String),
    /// Malformed caller input outside the numeric core
    InvalidInput(String),
    /// CSV reading or writing failed
    Csv(String),
}

impl WhittakerError {
    /// Strips any context wrappers and returns the underlying error.
    pub fn root_cause(&self) -> &WhittakerError {
        match self {
            WhittakerError::PenaltyMatrix(inner) => inner.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for WhittakerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhittakerError::InvalidOrder(order) => {
                write!(f, "Invalid order: {}. Order must be at least 1", order)
            }
            WhittakerError::SpacingLengthMismatch(spacing_len, data_len) => {
                write!(
                    f,
                    "Spacing length mismatch: {} spacing values for {} data points",
                    spacing_len, data_len
                )
            }
            WhittakerError::InsufficientData(data_len, order) => {
                write!(
                    f,
                    "Insufficient data: {} points. Need at least {} points for order {}",
                    data_len, order, order
                )
            }
            WhittakerError::InvalidSpacing(index, value) => {
                write!(
                    f,
                    "Invalid spacing at index {}: {}. Spacing must be finite and positive",
                    index, value
                )
            }
            WhittakerError::PenaltyMatrix(inner) => {
                write!(f, "failed to create penalty matrix: {}", inner)
            }
            WhittakerError::SolveFailure(msg) => {
                write!(f, "failed to solve the system: {}", msg)
            }
            WhittakerError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            WhittakerError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for WhittakerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WhittakerError::PenaltyMatrix(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl From<csv::Error> for WhittakerError {
    fn from(err: csv::Error) -> Self {
        WhittakerError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for WhittakerError {
    fn from(err: std::io::Error) -> Self {
        WhittakerError::Csv(err.to_string())
    }
}

/// Result type for Whittaker-Eilers operations
pub type Result<T> = std::result::Result<T, WhittakerError>;
