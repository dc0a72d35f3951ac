//! Trained feed-forward network with autoregressive rollout

use crate::config::NetworkSettings;
use crate::error::{ForecastError, Result};
use crate::models::{last_window, slide, ForecastResult};
use crate::network::{NetworkProvider, NeuralNetwork};
use crate::progress::ProgressReporter;
use rand::RngCore;
use tracing::{debug, warn};
use trade_math::{make_training_pairs, TrainingPair};

/// Network trained on `window`-wide slices of the series
///
/// Training runs until the error drops below the configured threshold or
/// the iteration cap is hit. Every `log_period` iterations it reports
/// progress, checks for cancellation and yields to the runtime.
#[derive(Debug, Clone)]
pub struct TrainedNetwork {
    name: String,
    window: usize,
    settings: NetworkSettings,
}

/// Outcome of a training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub iterations: usize,
    pub error: f64,
}

impl TrainedNetwork {
    pub fn new(window: usize, settings: NetworkSettings) -> Self {
        Self {
            name: format!("Trained Network (window={})", window),
            window,
            settings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Train a fresh network on `series` and roll it out `horizon` steps
    pub async fn predict(
        &self,
        provider: &dyn NetworkProvider,
        series: &[f64],
        horizon: usize,
        rng: &mut (dyn RngCore + Send),
        progress: Option<&ProgressReporter>,
    ) -> Result<ForecastResult> {
        if !provider.is_ready() {
            return Err(ForecastError::DependencyUnavailable(
                "Neural network backend is still loading".to_string(),
            ));
        }
        if series.len() <= self.window {
            return Err(ForecastError::InsufficientData {
                required: self.window.saturating_add(1),
                actual: series.len(),
            });
        }

        let pairs = make_training_pairs(series, self.window)?;
        let mut network = provider.build(self.window, &self.settings, rng)?;
        let report = self.train(network.as_mut(), &pairs, progress).await?;
        debug!(
            iterations = report.iterations,
            error = report.error,
            "training finished"
        );

        let mut window = last_window(series, self.window)?;
        let mut predictions = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let prediction = network.run(window.make_contiguous())?;
            predictions.push(prediction);
            slide(&mut window, prediction);
        }

        ForecastResult::new(predictions, horizon)
    }

    async fn train(
        &self,
        network: &mut dyn NeuralNetwork,
        pairs: &[TrainingPair],
        progress: Option<&ProgressReporter>,
    ) -> Result<TrainingReport> {
        let settings = &self.settings;
        let mut iterations = 0;
        let mut error = f64::INFINITY;

        while iterations < settings.max_iterations && error >= settings.error_threshold {
            error = network.train_iteration(pairs);
            iterations += 1;

            if iterations % settings.log_period == 0 {
                let percent = settings.progress_percent(iterations);
                debug!(iterations, error, percent, "training checkpoint");

                if let Some(reporter) = progress {
                    reporter.report(percent);
                    if reporter.is_cancelled() {
                        warn!(iterations, "training cancelled");
                        return Err(ForecastError::Cancelled);
                    }
                }
                tokio::task::yield_now().await;
            }
        }

        if error >= settings.error_threshold {
            warn!(
                iterations,
                error,
                threshold = settings.error_threshold,
                "iteration cap reached before error threshold"
            );
        }

        Ok(TrainingReport { iterations, error })
    }
}
