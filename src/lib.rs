//! # Whittaker-Eilers Smoother
//!
//! An implementation of the Whittaker-Eilers smoother for noisy, ordered
//! scalar data in Rust.
//!
//! The smoother solves the linear system `(I + λ·DᵀD) x = y`, where `y` is
//! the input sequence and `D` is a finite-difference penalty matrix of a
//! chosen order. The smoothing weight `λ` trades fidelity to the data
//! against roughness of the result: `λ = 0` returns the input unchanged,
//! larger values give smoother output.
//!
//! ## Features
//!
//! - Penalties of any difference order (1 = slope, 2 = curvature, ...)
//! - Non-uniform sample spacing
//! - Dense LU solve via nalgebra
//! - Stateless, thread-safe smoothing
//! - CSV helpers for column in / column out workflows
//!
//! ## Example
//!
//! ```rust
//! use whittaker_eilers::WhittakerSmoother;
//!
//! let data = vec![1.1, 1.9, 3.1, 3.91, 5.0, 6.02, 7.01, 7.7, 9.0, 10.0];
//! let smoother = WhittakerSmoother::new(20.0, 2).expect("Invalid parameters");
//! let smoothed = smoother.smooth(&data).expect("Smoothing failed");
//! ```

mod csv_utils;
mod error;
mod penalty;
mod smoother;
mod system;

pub use csv_utils::{append_csv_column, read_csv_column, read_csv_column_by_index};
pub use error::{Result, WhittakerError};
pub use penalty::{binomial_row, penalty_matrix};
pub use smoother::{
    roughness, smooth, spacing_from_positions, SmootherConfig, WhittakerSmoother, MAX_CONDITION,
};
pub use system::system_matrix;
