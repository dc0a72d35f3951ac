//! # Price Oracle
//!
//! Umbrella crate for the forecasting workspace. It re-exports the two
//! member crates so applications can depend on a single package:
//!
//! - [`math`]: normalization, windowing, regression and summary statistics
//! - [`forecast`]: the four forecasting models and the orchestrator
//!
//! ## Example
//!
//! ```
//! use price_oracle::math::normalize;
//!
//! let series = normalize(&[10.0, 15.0, 20.0]).unwrap();
//! assert_eq!(series.values(), &[0.0, 0.5, 1.0]);
//! assert_eq!(series.denormalize(0.5), 15.0);
//! ```

pub use price_forecast as forecast;
pub use trade_math as math;

pub use price_forecast::{
    Forecast, ForecastError, Forecaster, ModelKind, PriceHistory, PricePoint, StrategyConfig,
    TrendDirection, TrendSummary,
};

/// Version of the umbrella crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
