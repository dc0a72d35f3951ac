//! # Trade Math
//!
//! Numeric building blocks for price forecasting: unit-interval
//! normalization, sliding training windows, window statistics and
//! least-squares trend fitting.

use thiserror::Error;

pub mod normalize;
pub mod regression;
pub mod statistics;
pub mod windowing;

pub use normalize::{denormalize, normalize, NormalizedSeries};
pub use regression::LinearFit;
pub use windowing::{make_training_pairs, TrainingPair};

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;
