use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::data::MIN_UPLOAD_POINTS;
use price_forecast::{
    ForecastError, ForecastPoint, PriceHistory, PricePoint, TrendDirection, TrendSummary,
};
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_points(len: usize) -> Vec<PricePoint> {
    let start = date(2023, 1, 1);
    (0..len)
        .map(|i| PricePoint::new(start + chrono::Days::new(i as u64), 100.0 + i as f64 * 0.5))
        .collect()
}

fn forecast_points(prices: &[f64]) -> Vec<ForecastPoint> {
    let start = date(2024, 1, 31);
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| ForecastPoint::new(start + chrono::Days::new(i as u64), price))
        .collect()
}

#[test]
fn test_history_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,price").unwrap();
    for point in sample_points(MIN_UPLOAD_POINTS) {
        writeln!(file, "{},{}", point.date, point.price).unwrap();
    }

    let history = PriceHistory::from_csv(file.path()).unwrap();

    assert_eq!(history.len(), MIN_UPLOAD_POINTS);
    assert_eq!(history.points()[0], PricePoint::new(date(2023, 1, 1), 100.0));
    assert_eq!(history.last_date(), Some(date(2023, 2, 19)));
}

#[test]
fn test_history_from_json_file() {
    let original = PriceHistory::new(sample_points(60)).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", original.to_json().unwrap()).unwrap();

    let loaded = PriceHistory::from_json_file(file.path()).unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_json_upload_format() {
    let json = serde_json::to_string(&sample_points(MIN_UPLOAD_POINTS)).unwrap();
    assert!(json.starts_with(r#"[{"date":"2023-01-01","price":100.0}"#));

    let history = PriceHistory::from_json_str(&json).unwrap();
    assert_eq!(history.prices()[1], 100.5);
}

#[rstest]
#[case(0)]
#[case(10)]
#[case(MIN_UPLOAD_POINTS - 1)]
fn test_upload_needs_minimum_points(#[case] len: usize) {
    let json = serde_json::to_string(&sample_points(len)).unwrap();

    match PriceHistory::from_json_str(&json) {
        Err(ForecastError::DataError(msg)) => assert!(msg.contains("at least 50")),
        other => panic!("Expected DataError, got {:?}", other),
    }
}

#[test]
fn test_csv_upload_needs_minimum_points() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,price").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();
    writeln!(file, "2023-01-02,101.0").unwrap();

    assert!(matches!(
        PriceHistory::from_csv(file.path()),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_malformed_uploads() {
    assert!(matches!(
        PriceHistory::from_json_str("not json"),
        Err(ForecastError::JsonError(_))
    ));
    assert!(matches!(
        PriceHistory::from_json_str(r#"[{"date":"2023-13-45","price":1.0}]"#),
        Err(ForecastError::JsonError(_))
    ));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,price").unwrap();
    writeln!(file, "2023-01-01,abc").unwrap();
    assert!(matches!(
        PriceHistory::from_csv(file.path()),
        Err(ForecastError::CsvError(_))
    ));

    assert!(matches!(
        PriceHistory::from_json_file("/nonexistent/prices.json"),
        Err(ForecastError::IoError(_))
    ));
}

#[test]
fn test_history_rejects_invalid_prices() {
    let mut points = sample_points(5);
    points[2].price = -1.0;
    assert!(matches!(
        PriceHistory::new(points.clone()),
        Err(ForecastError::DataError(_))
    ));

    points[2].price = f64::NAN;
    assert!(PriceHistory::new(points).is_err());
}

#[test]
fn test_history_accessors() {
    let history = PriceHistory::new(sample_points(3)).unwrap();

    assert!(!history.is_empty());
    assert_eq!(history.prices(), vec![100.0, 100.5, 101.0]);

    let points: Vec<PricePoint> = history.into();
    assert_eq!(points.len(), 3);

    let empty = PriceHistory::new(Vec::new()).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.last_date(), None);
}

#[test]
fn test_trend_summary_up() {
    let summary = TrendSummary::from_points(&forecast_points(&[100.0, 104.0, 110.0])).unwrap();

    assert_eq!(summary.direction, TrendDirection::Up);
    assert!((summary.percent_change - 10.0).abs() < 1e-9);
    assert_eq!(summary.to_string(), "upward trend of 10.00%");
}

#[test]
fn test_trend_summary_down_is_absolute() {
    let summary = TrendSummary::from_points(&forecast_points(&[200.0, 150.0])).unwrap();

    assert_eq!(summary.direction, TrendDirection::Down);
    assert_eq!(summary.percent_change, 25.0);
    assert_eq!(summary.to_string(), "downward trend of 25.00%");
}

#[test]
fn test_trend_summary_flat_counts_as_up() {
    let summary = TrendSummary::from_points(&forecast_points(&[50.0, 40.0, 50.0])).unwrap();

    assert_eq!(summary.direction, TrendDirection::Up);
    assert_eq!(summary.percent_change, 0.0);
}

#[test]
fn test_trend_summary_edge_cases() {
    assert_eq!(TrendSummary::from_points(&[]), None);
    assert_eq!(TrendSummary::from_points(&forecast_points(&[10.0])), None);

    let from_zero = TrendSummary::from_points(&forecast_points(&[0.0, 5.0])).unwrap();
    assert_eq!(from_zero.direction, TrendDirection::Up);
    assert_eq!(from_zero.percent_change, 0.0);
}

#[test]
fn test_forecast_point_is_prediction() {
    let point = ForecastPoint::new(date(2024, 2, 1), 12.5);
    assert!(point.is_prediction);

    let json = serde_json::to_string(&point).unwrap();
    assert_eq!(json, r#"{"date":"2024-02-01","price":12.5,"isPrediction":true}"#);
}
