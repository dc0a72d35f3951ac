//! Sliding-window training pairs for autoregressive models

use crate::{MathError, Result};

/// One supervised example: `width` consecutive values and the value after them
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPair {
    pub input: Vec<f64>,
    pub output: f64,
}

/// Slide a window of `width` over `series`, emitting `series.len() - width` pairs
///
/// Pair `k` has input `series[k..k + width]` and output `series[k + width]`.
/// A series with `width` or fewer values cannot produce any pair and is
/// rejected with [`MathError::InsufficientData`].
pub fn make_training_pairs(series: &[f64], width: usize) -> Result<Vec<TrainingPair>> {
    if width == 0 {
        return Err(MathError::InvalidInput(
            "Window width must be positive".to_string(),
        ));
    }
    if series.len() <= width {
        return Err(MathError::InsufficientData(format!(
            "Need at least {} values for a window of {}, have {}",
            width + 1,
            width,
            series.len()
        )));
    }

    Ok(series
        .windows(width + 1)
        .map(|w| TrainingPair {
            input: w[..width].to_vec(),
            output: w[width],
        })
        .collect())
}
