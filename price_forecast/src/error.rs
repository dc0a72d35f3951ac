//! Error types for the price_forecast crate

use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough history for the requested window
    #[error("Insufficient data: need at least {required} data points, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Constant price series, cannot be normalized
    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    /// The numeric backend of the trained-network model is not ready
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// Unknown model kind or non-positive window/horizon
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error related to data validation or loading
    #[error("Data error: {0}")]
    DataError(String),

    /// Error parsing a calendar date
    #[error("Date error: {0}")]
    DateError(String),

    /// Training was cancelled through the progress channel
    #[error("Forecast cancelled")]
    Cancelled,

    /// Error from series math
    #[error("Math error: {0}")]
    Math(MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::DegenerateSeries(msg) => ForecastError::DegenerateSeries(msg),
            other => ForecastError::Math(other),
        }
    }
}
