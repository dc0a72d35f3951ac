//! Model selection and tuning parameters

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Forecasting algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Feed-forward network trained on sliding windows
    TrainedNetwork,
    /// Memory/forget-gate recurrence over the last window
    PseudoRecurrent,
    /// Least-squares trend line
    LinearTrend,
    /// Fixed-weight blend of three rollouts
    Ensemble,
}

/// Human-readable description of a model, as shown next to the model picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelProfile {
    pub architecture: &'static str,
    pub hidden_layers: &'static str,
    pub training_method: &'static str,
    pub learning_rate: &'static str,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::TrainedNetwork,
        ModelKind::PseudoRecurrent,
        ModelKind::LinearTrend,
        ModelKind::Ensemble,
    ];

    /// Canonical kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::TrainedNetwork => "trained-network",
            ModelKind::PseudoRecurrent => "pseudo-recurrent",
            ModelKind::LinearTrend => "linear-trend",
            ModelKind::Ensemble => "ensemble",
        }
    }

    /// Whether the model runs a training loop that reports progress
    pub fn requires_training(&self) -> bool {
        matches!(self, ModelKind::TrainedNetwork)
    }

    pub fn profile(&self) -> ModelProfile {
        match self {
            ModelKind::TrainedNetwork => ModelProfile {
                architecture: "Deep Neural Network",
                hidden_layers: "[20, 15, 10]",
                training_method: "Backpropagation",
                learning_rate: "0.02",
            },
            ModelKind::PseudoRecurrent => ModelProfile {
                architecture: "LSTM Recurrent",
                hidden_layers: "Memory Gates",
                training_method: "Sequential Learning",
                learning_rate: "Adaptive",
            },
            ModelKind::LinearTrend => ModelProfile {
                architecture: "Linear Regression",
                hidden_layers: "Single Layer",
                training_method: "Least Squares",
                learning_rate: "Optimal",
            },
            ModelKind::Ensemble => ModelProfile {
                architecture: "Ensemble Hybrid",
                hidden_layers: "Multi-Model",
                training_method: "Weighted Voting",
                learning_rate: "Dynamic",
            },
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "trained-network" | "neural" => Ok(ModelKind::TrainedNetwork),
            "pseudo-recurrent" | "lstm" => Ok(ModelKind::PseudoRecurrent),
            "linear-trend" | "linear" => Ok(ModelKind::LinearTrend),
            "ensemble" => Ok(ModelKind::Ensemble),
            other => Err(ForecastError::InvalidConfiguration(format!(
                "Unknown model kind: {}",
                other
            ))),
        }
    }
}

/// Per-request forecast parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub window_width: usize,
    pub horizon_days: usize,
    pub model_kind: ModelKind,
}

impl StrategyConfig {
    /// Window widths offered by the demo front end
    pub const STANDARD_WINDOWS: [usize; 4] = [5, 10, 15, 30];
    /// Horizons offered by the demo front end
    pub const STANDARD_HORIZONS: [usize; 4] = [5, 10, 15, 30];

    pub fn new(model_kind: ModelKind, window_width: usize, horizon_days: usize) -> Result<Self> {
        let config = Self {
            window_width,
            horizon_days,
            model_kind,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that window and horizon are positive
    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "Window width must be positive".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "Horizon must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest history that can be forecast with this window
    ///
    /// Saturates at `usize::MAX`, which no history can reach.
    pub fn min_history(&self) -> usize {
        self.window_width.saturating_add(1)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            window_width: 10,
            horizon_days: 10,
            model_kind: ModelKind::TrainedNetwork,
        }
    }
}

/// Hyper-parameters of the trained-network model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkSettings {
    pub hidden_layers: Vec<usize>,
    pub learning_rate: f64,
    pub momentum: f64,
    pub max_iterations: usize,
    pub error_threshold: f64,
    /// Iterations between progress checkpoints
    pub log_period: usize,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            hidden_layers: vec![20, 15, 10],
            learning_rate: 0.02,
            momentum: 0.1,
            max_iterations: 4000,
            error_threshold: 0.002,
            log_period: 100,
        }
    }
}

impl NetworkSettings {
    pub fn validate(&self) -> Result<()> {
        if self.hidden_layers.iter().any(|&w| w == 0) {
            return Err(ForecastError::InvalidConfiguration(
                "Hidden layer widths must be positive".to_string(),
            ));
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(ForecastError::InvalidConfiguration(
                "Learning rate must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(ForecastError::InvalidConfiguration(
                "Momentum must be in [0, 1)".to_string(),
            ));
        }
        if self.max_iterations == 0 || self.log_period == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "Iteration limit and log period must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Training progress in percent after `iterations` iterations
    pub fn progress_percent(&self, iterations: usize) -> f64 {
        (iterations as f64 / self.max_iterations as f64 * 100.0).min(100.0)
    }
}

/// Engine-wide settings, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub network: NetworkSettings,
}

impl ForecastSettings {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let settings: Self = serde_json::from_reader(reader)?;
        settings.network.validate()?;
        Ok(settings)
    }
}
