//! Min/max rescaling of price series to the unit interval
//!
//! A [`NormalizedSeries`] remembers the bounds of the source series so that
//! model output in `[0, 1]` can be mapped back to prices with [`denormalize`].

use crate::{MathError, Result};

/// A price series rescaled to `[0, 1]` together with the bounds used to do it
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl NormalizedSeries {
    /// Normalized values, one per source price
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest price of the source series
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest price of the source series
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Map a normalized value back into the source price range
    pub fn denormalize(&self, value: f64) -> f64 {
        denormalize(value, self.min, self.max)
    }
}

/// Rescale `prices` with `(v - min) / (max - min)`
///
/// Fails with [`MathError::DegenerateSeries`] when every price is equal,
/// since the mapping would divide by zero.
pub fn normalize(prices: &[f64]) -> Result<NormalizedSeries> {
    if prices.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot normalize an empty series".to_string(),
        ));
    }
    if let Some(bad) = prices.iter().find(|p| !p.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "Series contains a non-finite value: {}",
            bad
        )));
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return Err(MathError::DegenerateSeries(format!(
            "All {} values equal {}",
            prices.len(),
            min
        )));
    }

    let values = prices.iter().map(|&p| (p - min) / range).collect();

    Ok(NormalizedSeries { values, min, max })
}

/// Inverse of [`normalize`]: `value * (max - min) + min`, unclamped
pub fn denormalize(value: f64, min: f64, max: f64) -> f64 {
    value * (max - min) + min
}
