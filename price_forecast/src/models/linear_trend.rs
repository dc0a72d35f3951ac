//! Least-squares trend extrapolation

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult};
use rand::RngCore;
use trade_math::statistics::clamp_unit;
use trade_math::LinearFit;

/// Fits a straight line over the whole series and extends it
///
/// The clamped variant keeps every prediction inside the observed range
/// `[0, 1]`; the unbounded variant extends the line as is, which is what a
/// forecast of a steadily rising or falling series needs.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    name: String,
    clamped: bool,
}

impl LinearTrend {
    /// Trend line with predictions clamped to `[0, 1]`
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
            clamped: true,
        }
    }

    /// Trend line extended past the observed range
    pub fn unbounded() -> Self {
        Self {
            name: "Linear Trend (unbounded)".to_string(),
            clamped: false,
        }
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// Deterministic forecast; no random source needed
    pub fn extrapolate(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        if series.len() < 2 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: series.len(),
            });
        }
        let fit = LinearFit::fit(series)?;

        let values = (1..=horizon)
            .map(|step| {
                let value = fit.extrapolate(step);
                if self.clamped {
                    clamp_unit(value)
                } else {
                    value
                }
            })
            .collect();

        ForecastResult::new(values, horizon)
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    fn predict(
        &self,
        series: &[f64],
        horizon: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<ForecastResult> {
        self.extrapolate(series, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
