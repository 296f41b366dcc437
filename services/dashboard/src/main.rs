//! Sea-surface temperature anomaly dashboard.
//!
//! Serves a single-page dashboard with the rendered anomaly map, the raw
//! field as JSON, and a health endpoint.

mod handlers;
mod state;

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "SST anomaly map dashboard")]
struct Args {
    /// Listen address
    #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8090")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory holding persisted fields
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    data_dir: String,

    /// Field name to load or synthesize
    #[arg(long, env = "FIELD_NAME", default_value = "sst_anomaly")]
    field: String,

    /// Seed used when the field has to be synthesized
    #[arg(long, env = "FIELD_SEED", default_value_t = 42)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!(field = %args.field, data_dir = %args.data_dir, "Starting dashboard");

    let state = Arc::new(AppState::new(&args.data_dir, &args.field, args.seed)?);

    let app = Router::new()
        .route("/", get(handlers::index_handler))
        .route("/map.png", get(handlers::map_handler))
        .route("/data", get(handlers::data_handler))
        .route("/health", get(handlers::health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
