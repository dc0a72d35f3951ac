//! # Price Forecast
//!
//! Short-horizon price extrapolation over a daily closing-price series.
//!
//! ## Features
//!
//! - Unit-interval normalization of the history and mapping back to prices
//! - Four interchangeable models:
//!   - **Trained network**: feed-forward network trained on sliding windows,
//!     rolled out autoregressively, with an observable progress channel
//!   - **Pseudo-recurrent**: memory-cell recurrence over the last window
//!   - **Linear trend**: least-squares line extended past the history
//!   - **Ensemble**: fixed 0.4/0.4/0.2 blend of three rollouts
//! - Dated forecast points starting the day after the last observation
//! - Trend summary (direction and percentage change over the horizon)
//! - JSON/CSV loaders for uploaded histories and a demo history generator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use price_forecast::{Forecaster, ModelKind, PriceHistory, StrategyConfig};
//!
//! # async fn run() -> price_forecast::Result<()> {
//! let history = PriceHistory::from_json_file("prices.json")?;
//! let config = StrategyConfig::new(ModelKind::LinearTrend, 10, 5)?;
//!
//! let forecast = Forecaster::default()
//!     .forecast(history.points(), &config, None)
//!     .await?;
//!
//! for point in &forecast.points {
//!     println!("{} {:.2}", point.date, point.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod models;
pub mod network;
pub mod progress;
pub mod synthetic;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ForecastSettings, ModelKind, NetworkSettings, StrategyConfig};
pub use crate::data::{ForecastPoint, PriceHistory, PricePoint, TrendDirection, TrendSummary};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{Forecast, Forecaster};
pub use crate::models::{ForecastModel, ForecastResult};
pub use crate::progress::{progress_channel, ProgressReporter, ProgressWatcher};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
