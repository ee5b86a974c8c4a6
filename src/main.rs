//! dice-service entry point.
//!
//! Initializes tracing, loads configuration, opens the dice log, builds the
//! Axum router and serves it until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dice_service::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use dice_service::dice_log::DiceLog;
use dice_service::http::start_server;
use dice_service::readiness::Readiness;
use dice_service::routes::create_router;
use dice_service::state::AppState;
use dice_service::AppError;

/// dice-service: roll a die over HTTP
#[derive(Parser, Debug)]
#[command(name = "dice-service", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Interface to bind (overrides http.host)
    #[arg(long)]
    host: Option<String>,

    /// TCP port to listen on (overrides http.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds /health reports unhealthy after SIGTERM (overrides http.drain_delay_secs)
    #[arg(long)]
    drain_delay: Option<u64>,

    /// Dice log file (overrides dice_log.path)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level filter (e.g., "dice_service=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(secs) = args.drain_delay {
        config.http.drain_delay_secs = secs;
    }
    if let Some(path) = args.log_file {
        config.dice_log.path = path;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    // Diagnostics go to stderr; stdout carries only the dice log mirror
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if config.logging.is_json() {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        dice_log = %config.dice_log.path.display(),
        "Loaded configuration"
    );

    // The file mirror is mandatory; refuse to serve without it
    let dice_log = DiceLog::open(&config.dice_log.path, config.dice_log.console)?;
    tracing::info!(
        path = %config.dice_log.path.display(),
        console = config.dice_log.console,
        "Opened dice log"
    );

    let readiness = Readiness::new();
    let state = AppState::new(readiness.clone(), Arc::new(dice_log));
    let app = create_router(state);

    start_server(app, &config.http, readiness).await?;

    Ok(())
}
