//! Fixed-weight blend of three rollouts

use crate::error::Result;
use crate::models::{
    last_window, slide, ForecastModel, ForecastResult, LinearTrend, PseudoRecurrent,
};
use rand::{Rng, RngCore};
use trade_math::statistics::{clamp_unit, mean, trend};

pub const LIGHTWEIGHT_WEIGHT: f64 = 0.4;
pub const RECURRENT_WEIGHT: f64 = 0.4;
pub const LINEAR_WEIGHT: f64 = 0.2;

const LIGHTWEIGHT_TREND: f64 = 0.2;
const LIGHTWEIGHT_NOISE: f64 = 0.05;

/// Component forecasts of one ensemble run, all in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleComponents {
    pub lightweight: Vec<f64>,
    pub recurrent: Vec<f64>,
    pub linear: Vec<f64>,
}

impl EnsembleComponents {
    /// Element-wise `0.4 * lightweight + 0.4 * recurrent + 0.2 * linear`
    pub fn combine(&self) -> Vec<f64> {
        self.lightweight
            .iter()
            .zip(&self.recurrent)
            .zip(&self.linear)
            .map(|((a, b), c)| a * LIGHTWEIGHT_WEIGHT + b * RECURRENT_WEIGHT + c * LINEAR_WEIGHT)
            .collect()
    }
}

/// Blends a lightweight trend rollout, the pseudo-recurrent model and the
/// linear trend
#[derive(Debug, Clone)]
pub struct Ensemble {
    name: String,
    recurrent: PseudoRecurrent,
    linear: LinearTrend,
}

impl Ensemble {
    pub fn new(window: usize) -> Self {
        Self {
            name: format!("Ensemble (window={})", window),
            recurrent: PseudoRecurrent::new(window),
            linear: LinearTrend::new(),
        }
    }

    /// Run the three components, recurrent first, then linear, then lightweight
    pub fn components(
        &self,
        series: &[f64],
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<EnsembleComponents> {
        let recurrent = self.recurrent.predict(series, horizon, rng)?.into_values();
        let linear = self.linear.extrapolate(series, horizon)?.into_values();
        let lightweight = self.lightweight_rollout(series, horizon, rng)?;

        Ok(EnsembleComponents {
            lightweight,
            recurrent,
            linear,
        })
    }

    /// Window mean plus a fifth of the window trend and a small perturbation
    fn lightweight_rollout(
        &self,
        series: &[f64],
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>> {
        let mut window = last_window(series, self.recurrent.window())?;
        let mut predictions = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let values = window.make_contiguous();
            let prediction = mean(values)?
                + trend(values)? * LIGHTWEIGHT_TREND
                + (rng.gen::<f64>() - 0.5) * LIGHTWEIGHT_NOISE;

            predictions.push(clamp_unit(prediction));
            slide(&mut window, prediction);
        }

        Ok(predictions)
    }
}

impl ForecastModel for Ensemble {
    fn predict(
        &self,
        series: &[f64],
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<ForecastResult> {
        let components = self.components(series, horizon, rng)?;
        ForecastResult::new(components.combine(), horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
