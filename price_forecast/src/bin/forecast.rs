//! Price forecast command-line tool
//!
//! Loads a price history (or generates a demo one), runs the selected model
//! and prints the dated forecast with its trend.

use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use price_forecast::network::{BurnProvider, FeedForwardProvider, NetworkProvider};
use price_forecast::synthetic::generate_history;
use price_forecast::{
    progress_channel, ForecastSettings, Forecaster, ModelKind, PriceHistory, StrategyConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Network implementation used by the trained model
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// burn on the ndarray CPU backend
    Burn,
    /// In-process network trained one pair at a time
    Native,
}

#[derive(Parser)]
#[command(name = "price-forecast")]
#[command(about = "Extrapolate a daily price series", long_about = None)]
struct Cli {
    /// JSON or CSV file of {date, price} points (at least 50)
    #[arg(short, long, conflicts_with = "symbol")]
    input: Option<PathBuf>,

    /// Generate a demo history for this ticker instead of reading a file
    #[arg(short, long)]
    symbol: Option<String>,

    /// Days of demo history to generate
    #[arg(long, default_value = "60")]
    days: usize,

    /// Model: neural, lstm, linear or ensemble (or the long names)
    #[arg(short, long, default_value = "neural")]
    model: String,

    /// Window width in days
    #[arg(short, long, default_value = "10")]
    window: usize,

    /// Number of days to forecast
    #[arg(long, default_value = "10")]
    horizon: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Network backend for the trained model
    #[arg(long, value_enum, default_value = "burn")]
    backend: Backend,

    /// JSON file overriding network settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the forecast as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn load_history(cli: &Cli) -> Result<PriceHistory> {
    if let Some(path) = &cli.input {
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let history = if is_csv {
            PriceHistory::from_csv(path)?
        } else {
            PriceHistory::from_json_file(path)?
        };
        return Ok(history);
    }

    if let Some(symbol) = &cli.symbol {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let today = Local::now().date_naive();
        return Ok(generate_history(symbol, cli.days, today, &mut rng)?);
    }

    bail!("Provide either --input FILE or --symbol TICKER")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = match &cli.settings {
        Some(path) => ForecastSettings::from_json_file(path)?,
        None => ForecastSettings::default(),
    };
    let model_kind: ModelKind = cli.model.parse()?;
    let config = StrategyConfig::new(model_kind, cli.window, cli.horizon)?;
    let history = load_history(&cli)?;
    info!(points = history.len(), "history loaded");

    let profile = model_kind.profile();
    println!("Model:           {} ({})", profile.architecture, model_kind);
    println!("Hidden layers:   {}", profile.hidden_layers);
    println!("Training method: {}", profile.training_method);
    println!("Learning rate:   {}", profile.learning_rate);
    println!("Window size:     {} days", config.window_width);
    println!("Horizon:         {} days", config.horizon_days);
    println!();

    let (reporter, mut watcher) = progress_channel();

    let canceller = watcher.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let show_progress = model_kind.requires_training();
    let monitor = tokio::spawn(async move {
        while let Some(percent) = watcher.changed().await {
            if show_progress {
                info!("Training {}... {:.0}% complete", model_kind, percent);
            }
        }
    });

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let provider: Arc<dyn NetworkProvider> = match cli.backend {
        Backend::Burn => Arc::new(BurnProvider),
        Backend::Native => Arc::new(FeedForwardProvider),
    };
    let forecaster = Forecaster::with_provider(provider, settings);
    let result = forecaster
        .forecast_with_rng(history.points(), &config, &mut rng, Some(&reporter))
        .await;
    drop(reporter);
    monitor.await?;
    let forecast = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    for point in &forecast.points {
        println!("{}  {:>12.2}", point.date, point.price);
    }
    if let Some(trend) = &forecast.trend {
        println!();
        println!("{}-day forecast shows {}", config.horizon_days, trend);
    }

    Ok(())
}
