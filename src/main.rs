//! Chicken Sales Dashboard Server
//!
//! Run with: cargo run --bin chicken-sales
//!
//! # Configuration
//!
//! Settings come from `--config FILE`, the user config directory
//! (`chicken-sales/config.toml`) or `./config.toml`, in that order.
//! Environment variables override the file:
//! - `CHICKEN_SALES_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CHICKEN_SALES_API_PORT`: Port to listen on (default: 8501)
//! - `CHICKEN_SALES_LOCALE`: ko or en (default: ko)
//! - `CHICKEN_SALES_RENDERER`: svg or plotly (default: svg)
//! - `CHICKEN_SALES_DATASET`: CSV file to load instead of the built-in data
//! - `CHICKEN_SALES_LOG_LEVEL` / `CHICKEN_SALES_LOG_FORMAT`: logging
//! - `RUST_LOG`: Full filter directive, wins over the level above

use chicken_sales::api::{serve, AppState};
use chicken_sales::config::{Config, LoggingConfig};
use chicken_sales::dashboard::Dashboard;
use chicken_sales::sales::load_or_default;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chicken-sales")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monthly chicken sales dashboard server")]
struct Args {
    /// Config file (default: user config dir, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::resolve(args.config.as_deref())?;

    init_tracing(&config.logging);

    tracing::info!(
        "Starting chicken sales dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load the series once; every request renders from it
    let series = load_or_default(config.dashboard.dataset_path())?;
    tracing::info!(records = series.len(), "Sales data loaded");

    let dashboard = Dashboard::from_config(&config.dashboard);
    tracing::info!(
        locale = %config.dashboard.locale,
        renderer = %config.dashboard.renderer,
        "Dashboard configured"
    );

    let api_config = config.api.to_runtime();
    let state = AppState::new(series, dashboard, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Chicken sales dashboard stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("chicken_sales={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
