//! Forecasting models over normalized price series
//!
//! Every model consumes a series already rescaled to `[0, 1]` and returns
//! `horizon` values on the same scale. The synchronous models implement
//! [`ForecastModel`]; the trained network has its own async entry point in
//! [`neural`] because it runs a long training loop.

use crate::error::{ForecastError, Result};
use rand::RngCore;
use std::collections::VecDeque;
use std::fmt::Debug;

/// Forecast result containing predicted values
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Synchronous forecasting model
pub trait ForecastModel: Debug + Send + Sync {
    /// Forecast `horizon` normalized values following `series`
    ///
    /// Models with a random perturbation draw it from `rng`, so a seeded
    /// generator makes the output reproducible.
    fn predict(
        &self,
        series: &[f64],
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<ForecastResult>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// The last `width` values of `series`, or an insufficient-data error
pub(crate) fn last_window(series: &[f64], width: usize) -> Result<VecDeque<f64>> {
    if width == 0 {
        return Err(ForecastError::InvalidConfiguration(
            "Window width must be positive".to_string(),
        ));
    }
    if series.len() < width {
        return Err(ForecastError::InsufficientData {
            required: width,
            actual: series.len(),
        });
    }
    Ok(series[series.len() - width..].iter().copied().collect())
}

/// Drop the oldest value of `window` and append `value`
pub(crate) fn slide(window: &mut VecDeque<f64>, value: f64) {
    window.pop_front();
    window.push_back(value);
}

pub mod ensemble;
pub mod linear_trend;
pub mod neural;
pub mod recurrent;

pub use ensemble::Ensemble;
pub use linear_trend::LinearTrend;
pub use neural::TrainedNetwork;
pub use recurrent::PseudoRecurrent;
