//! Window statistics shared by the rollout models

use crate::{MathError, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean of `values`
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty window".to_string(),
        ));
    }
    Ok(values.iter().mean())
}

/// Population (divide by `n`) standard deviation of `values`
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the deviation of an empty window".to_string(),
        ));
    }
    Ok(values.iter().population_std_dev())
}

/// Difference between the newest and the oldest value of a window
pub fn trend(values: &[f64]) -> Result<f64> {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => Ok(last - first),
        _ => Err(MathError::InsufficientData(
            "Cannot take the trend of an empty window".to_string(),
        )),
    }
}

/// Clamp to `[0, 1]`
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
