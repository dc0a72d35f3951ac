//! LSTM-inspired recurrence with a single scalar memory cell

use crate::error::Result;
use crate::models::{last_window, slide, ForecastModel, ForecastResult};
use rand::{Rng, RngCore};
use trade_math::statistics::{clamp_unit, mean, population_std_dev, trend};

/// Share of the previous cell state kept at each step
pub const FORGET_GATE: f64 = 0.7;
/// Share of the window mean written into the cell at each step
pub const INPUT_GATE: f64 = 0.3;
const TREND_WEIGHT: f64 = 0.1;
const NOISE_WEIGHT: f64 = 0.1;

/// Pseudo-recurrent rollout model
///
/// The cell starts at the mean of the last window. Each step blends the
/// window mean into the cell, adds a tenth of the window trend and a random
/// perturbation scaled by the window volatility, and slides the window.
#[derive(Debug, Clone)]
pub struct PseudoRecurrent {
    name: String,
    window: usize,
}

impl PseudoRecurrent {
    pub fn new(window: usize) -> Self {
        Self {
            name: format!("Pseudo-Recurrent (window={})", window),
            window,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for PseudoRecurrent {
    fn predict(
        &self,
        series: &[f64],
        horizon: usize,
        rng: &mut dyn RngCore,
    ) -> Result<ForecastResult> {
        let mut window = last_window(series, self.window)?;
        let mut cell_state = mean(window.make_contiguous())?;
        let mut predictions = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let values = window.make_contiguous();
            let window_mean = mean(values)?;
            let window_trend = trend(values)?;
            cell_state = cell_state * FORGET_GATE + window_mean * INPUT_GATE;

            let volatility = population_std_dev(values)?;
            let noise = rng.gen::<f64>() - 0.5;
            let prediction =
                cell_state + window_trend * TREND_WEIGHT + noise * volatility * NOISE_WEIGHT;

            predictions.push(clamp_unit(prediction));
            // The window carries the unclamped value forward
            slide(&mut window, prediction);
        }

        ForecastResult::new(predictions, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
