//! Price series handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Minimum number of points an uploaded dataset must carry
pub const MIN_UPLOAD_POINTS: usize = 50;

/// One observed closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// One forecasted price, always flagged as a prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub is_prediction: bool,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            is_prediction: true,
        }
    }
}

/// Direction of a forecast over its horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// First-versus-last summary of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub direction: TrendDirection,
    /// Absolute percentage change between the first and last forecast price
    pub percent_change: f64,
}

impl TrendSummary {
    /// Summarize a forecast; `None` with fewer than two points
    pub fn from_points(points: &[ForecastPoint]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let first = points[0].price;
        let last = points[points.len() - 1].price;

        let direction = if last >= first {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        // A zero starting price has no meaningful relative change
        let percent_change = if first == 0.0 {
            0.0
        } else {
            ((last - first) / first).abs() * 100.0
        };

        Some(Self {
            direction,
            percent_change,
        })
    }
}

impl fmt::Display for TrendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self.direction {
            TrendDirection::Up => "upward",
            TrendDirection::Down => "downward",
        };
        write!(f, "{} trend of {:.2}%", word, self.percent_change)
    }
}

/// Chronological series of observed prices
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Create a history from points already in chronological order
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if let Some(bad) = points
            .iter()
            .find(|p| !p.price.is_finite() || p.price < 0.0)
        {
            return Err(ForecastError::DataError(format!(
                "Invalid price {} on {}",
                bad.price, bad.date
            )));
        }
        Ok(Self { points })
    }

    /// Parse a JSON array of `{"date": "YYYY-MM-DD", "price": 100.0}` objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let points: Vec<PricePoint> = serde_json::from_str(json)?;
        Self::checked_upload(points)
    }

    /// Load a JSON array of price points from a file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let points: Vec<PricePoint> = serde_json::from_reader(reader)?;
        Self::checked_upload(points)
    }

    /// Load a CSV file with a `date,price` header
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let points = reader
            .deserialize::<PricePoint>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::checked_upload(points)
    }

    fn checked_upload(points: Vec<PricePoint>) -> Result<Self> {
        if points.len() < MIN_UPLOAD_POINTS {
            return Err(ForecastError::DataError(format!(
                "Please provide at least {} data points, got {}",
                MIN_UPLOAD_POINTS,
                points.len()
            )));
        }
        Self::new(points)
    }

    /// Serialize back to the JSON upload format
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.points)?)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices in chronological order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<PriceHistory> for Vec<PricePoint> {
    fn from(history: PriceHistory) -> Self {
        history.points
    }
}
