//! Demo price histories for symbols without uploaded data

use crate::data::{PriceHistory, PricePoint};
use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use rand::Rng;

const DAILY_VOLATILITY: f64 = 0.03;
const TREND_AMPLITUDE: f64 = 0.005;
const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Starting price used for a ticker symbol
pub fn base_price(symbol: &str) -> f64 {
    match symbol.to_uppercase().as_str() {
        "AAPL" => 175.50,
        "GOOGL" => 140.25,
        "MSFT" => 415.30,
        "TSLA" => 245.80,
        "AMZN" => 155.90,
        "META" => 325.60,
        "NVDA" => 875.20,
        "NFLX" => 450.15,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Random walk of `days + 1` daily closes ending on `end_date`
///
/// Each day moves by up to ±3% plus a slow sinusoidal drift. Prices are
/// rounded to cents on output; the walk itself keeps full precision.
pub fn generate_history<R: Rng + ?Sized>(
    symbol: &str,
    days: usize,
    end_date: NaiveDate,
    rng: &mut R,
) -> Result<PriceHistory> {
    let mut price = base_price(symbol);
    let mut points = Vec::with_capacity(days + 1);

    for i in (0..=days).rev() {
        let date = end_date.checked_sub_days(Days::new(i as u64)).ok_or_else(|| {
            ForecastError::DateError(format!("Date underflow {} days before {}", i, end_date))
        })?;

        let drift = (i as f64 / 10.0).sin() * TREND_AMPLITUDE;
        let change = (rng.gen::<f64>() - 0.5) * 2.0 * DAILY_VOLATILITY + drift;
        price *= 1.0 + change;

        points.push(PricePoint::new(date, (price * 100.0).round() / 100.0));
    }

    PriceHistory::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_and_unknown_symbols() {
        assert_eq!(base_price("aapl"), 175.50);
        assert_eq!(base_price("NVDA"), 875.20);
        assert_eq!(base_price("XYZ"), 100.0);
    }

    #[test]
    fn test_history_shape() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let history = generate_history("MSFT", 30, end, &mut rng).unwrap();

        assert_eq!(history.len(), 31);
        assert_eq!(history.last_date(), Some(end));
        assert_eq!(
            history.points()[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        for pair in history.points().windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
            // ±3% noise plus at most 0.5% drift
            let ratio = pair[1].price / pair[0].price;
            assert!(ratio > 0.96 && ratio < 1.04, "ratio {}", ratio);
        }
    }
}
