//! Forecast orchestration: normalize, run a model, map back to dated prices

use crate::config::{ForecastSettings, ModelKind, StrategyConfig};
use crate::data::{ForecastPoint, PricePoint, TrendSummary};
use crate::error::{ForecastError, Result};
use crate::models::{Ensemble, ForecastModel, LinearTrend, PseudoRecurrent, TrainedNetwork};
use crate::network::{BurnProvider, NetworkProvider};
use crate::progress::ProgressReporter;
use crate::utils::future_dates;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use trade_math::normalize;

/// Dated forecast with its trend summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub model_kind: ModelKind,
    pub points: Vec<ForecastPoint>,
    /// `None` when the horizon has fewer than two points
    pub trend: Option<TrendSummary>,
}

/// Runs forecasts against a network backend and engine settings
///
/// Each call works on its own copy of the data; a `Forecaster` can be
/// shared between tasks.
#[derive(Clone)]
pub struct Forecaster {
    provider: Arc<dyn NetworkProvider>,
    settings: ForecastSettings,
}

impl std::fmt::Debug for Forecaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forecaster")
            .field("provider_ready", &self.provider.is_ready())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(ForecastSettings::default())
    }
}

impl Forecaster {
    /// Forecaster backed by the `burn` network provider
    pub fn new(settings: ForecastSettings) -> Self {
        Self::with_provider(Arc::new(BurnProvider), settings)
    }

    pub fn with_provider(provider: Arc<dyn NetworkProvider>, settings: ForecastSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Forecast with an entropy-seeded random source
    pub async fn forecast(
        &self,
        history: &[PricePoint],
        config: &StrategyConfig,
        progress: Option<&ProgressReporter>,
    ) -> Result<Forecast> {
        let mut rng = StdRng::from_entropy();
        self.forecast_with_rng(history, config, &mut rng, progress)
            .await
    }

    /// Forecast drawing every random perturbation from `rng`
    pub async fn forecast_with_rng<R: RngCore + Send>(
        &self,
        history: &[PricePoint],
        config: &StrategyConfig,
        rng: &mut R,
        progress: Option<&ProgressReporter>,
    ) -> Result<Forecast> {
        config.validate()?;
        if history.len() < config.min_history() {
            return Err(ForecastError::InsufficientData {
                required: config.min_history(),
                actual: history.len(),
            });
        }
        let last_date = match history.last() {
            Some(point) => point.date,
            None => {
                return Err(ForecastError::InsufficientData {
                    required: config.min_history(),
                    actual: 0,
                })
            }
        };

        info!(
            model = %config.model_kind,
            window = config.window_width,
            horizon = config.horizon_days,
            points = history.len(),
            "starting forecast"
        );

        let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
        let series = normalize(&prices)?;

        if let Some(reporter) = progress {
            reporter.report(0.0);
        }

        let raw = match config.model_kind {
            ModelKind::TrainedNetwork => {
                let model = TrainedNetwork::new(config.window_width, self.settings.network.clone());
                model
                    .predict(
                        self.provider.as_ref(),
                        series.values(),
                        config.horizon_days,
                        rng,
                        progress,
                    )
                    .await?
            }
            kind => {
                let model = synchronous_model(kind, config.window_width)?;
                model.predict(series.values(), config.horizon_days, rng)?
            }
        };

        if let Some(reporter) = progress {
            reporter.report(100.0);
        }

        let dates = future_dates(last_date, config.horizon_days)?;
        let points: Vec<ForecastPoint> = raw
            .values()
            .iter()
            .zip(dates)
            .map(|(&value, date)| ForecastPoint::new(date, series.denormalize(value).max(0.0)))
            .collect();
        let trend = TrendSummary::from_points(&points);

        match &trend {
            Some(summary) => info!(
                model = %config.model_kind,
                trend = %summary,
                "forecast complete"
            ),
            None => info!(model = %config.model_kind, "forecast complete"),
        }

        Ok(Forecast {
            model_kind: config.model_kind,
            points,
            trend,
        })
    }
}

/// Model instance for the kinds that need no training loop
///
/// `linear-trend` gets the unbounded line so a steadily moving history is
/// continued past its observed range; the ensemble keeps its own clamped
/// linear component. Denormalized prices are still floored at zero.
pub fn synchronous_model(kind: ModelKind, window: usize) -> Result<Box<dyn ForecastModel>> {
    match kind {
        ModelKind::PseudoRecurrent => Ok(Box::new(PseudoRecurrent::new(window))),
        ModelKind::LinearTrend => Ok(Box::new(LinearTrend::unbounded())),
        ModelKind::Ensemble => Ok(Box::new(Ensemble::new(window))),
        ModelKind::TrainedNetwork => Err(ForecastError::InvalidConfiguration(
            "The trained network runs asynchronously".to_string(),
        )),
    }
}
