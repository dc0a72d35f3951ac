//! Calendar helpers for forecast output

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// Date format used by price files and forecast output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| ForecastError::DateError(format!("Invalid date '{}': {}", s, e)))
}

/// `horizon` consecutive calendar days following `last_date`
///
/// Weekends and holidays are not skipped.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    (1..=horizon as u64)
        .map(|offset| {
            last_date.checked_add_days(Days::new(offset)).ok_or_else(|| {
                ForecastError::DateError(format!(
                    "Date overflow {} days after {}",
                    offset, last_date
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_dates_cross_month() {
        let last = parse_date("2024-01-30").unwrap();
        let dates = future_dates(last, 3).unwrap();

        assert_eq!(
            dates,
            vec![
                parse_date("2024-01-31").unwrap(),
                parse_date("2024-02-01").unwrap(),
                parse_date("2024-02-02").unwrap(),
            ]
        );
    }

    #[test]
    fn test_future_dates_leap_day() {
        let last = parse_date("2024-02-28").unwrap();
        let dates = future_dates(last, 2).unwrap();

        assert_eq!(dates[0].to_string(), "2024-02-29");
        assert_eq!(dates[1].to_string(), "2024-03-01");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("30/01/2024"),
            Err(ForecastError::DateError(_))
        ));
    }
}
