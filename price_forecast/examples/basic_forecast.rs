use chrono::NaiveDate;
use price_forecast::synthetic::generate_history;
use price_forecast::{progress_channel, Forecaster, ModelKind, StrategyConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let end = NaiveDate::from_ymd_opt(2024, 6, 28).ok_or("bad date")?;
    let mut rng = StdRng::seed_from_u64(42);
    let history = generate_history("AAPL", 60, end, &mut rng)?;
    println!("Generated {} data points for AAPL", history.len());

    let forecaster = Forecaster::default();

    for kind in ModelKind::ALL {
        let config = StrategyConfig::new(kind, 10, 5)?;
        let (reporter, watcher) = progress_channel();

        let forecast = forecaster
            .forecast_with_rng(history.points(), &config, &mut rng, Some(&reporter))
            .await?;

        println!();
        println!("{} (progress {:.0}%)", kind.profile().architecture, watcher.current());
        for point in &forecast.points {
            println!("  {}: {:.2}", point.date, point.price);
        }
        if let Some(trend) = forecast.trend {
            println!("  {}-day forecast shows {}", config.horizon_days, trend);
        }
    }

    Ok(())
}
