//! CLI entry point for the Dublin data dashboard feed.
//!
//! Fetches live transport arrivals, Dublin Bikes availability and the
//! weather forecast, and prints them as JSON for the dashboard page.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dublin_data::{
    bikes::DublinBikes,
    config::{self, Config},
    fetch::BasicClient,
    output::emit,
    snapshot::Sources,
    transport::{Transport, rtpi::RtpiClient},
    weather::DarkSky,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "dublin_data")]
#[command(about = "Fetch Dublin transport, bike and weather data as JSON", long_about = None)]
struct Cli {
    /// Config file (defaults to $DUBLIN_DATA_CONFIG, then ~/.config/dublin_data.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Write JSON to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch everything and print one timestamped snapshot
    Snapshot,
    /// Fetch transport arrivals for one category or all of them
    Transport {
        /// BUS or LUAS; omit for both
        #[arg(value_name = "CATEGORY")]
        category: Option<String>,
    },
    /// Fetch Dublin Bikes station availability
    Bikes,
    /// Fetch the weather forecast
    Weather,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/dublin_data.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("dublin_data.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config_path = config::resolve_path(cli.config);
    info!(path = %config_path, "Loading config");
    let config = Config::load(&config_path)?;
    let output = cli.output.as_deref();

    match cli.command {
        Commands::Snapshot => {
            let sources = Sources::from_config(&config)?;
            let snapshot = sources.snapshot().await?;
            emit(output, &snapshot)?;
        }
        Commands::Transport { category } => {
            let rtpi = RtpiClient::new(BasicClient::new()?, config.endpoints.rtpi.clone());
            let transport = Transport::from_config(rtpi, &config);
            match category {
                Some(name) => {
                    let buckets = transport
                        .category(&name)
                        .await
                        .with_context(|| format!("failed to fetch {name} arrivals"))?;
                    emit(output, &buckets)?;
                }
                None => {
                    let data = transport.all().await.context("failed to fetch arrivals")?;
                    emit(output, &data)?;
                }
            }
        }
        Commands::Bikes => {
            let bikes = DublinBikes::new(
                BasicClient::new()?,
                &config.api_keys.dublinbikes,
                config.endpoints.dublinbikes.clone(),
                config.bike_stops.clone(),
            );
            let stations = bikes.stations().await?;
            info!(stations = stations.len(), "Bike stations fetched");
            emit(output, &stations)?;
        }
        Commands::Weather => {
            let darksky = DarkSky::new(
                BasicClient::new()?,
                config.endpoints.darksky.clone(),
                config.api_keys.darksky.clone(),
                config.darksky,
            );
            let weather = darksky.forecast().await?;
            emit(output, &weather)?;
        }
    }

    Ok(())
}
