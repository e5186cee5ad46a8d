use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mflix_api::config::{config, StoreBackend};
use mflix_api::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "mflix-api")]
#[command(about = "REST API over the sample_mflix movies, theaters and comments collections")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "MFLIX_API_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Serve from an in-memory store instead of MongoDB
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mflix_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let mut settings = config().clone();
    if args.in_memory {
        settings.database.backend = StoreBackend::Memory;
    }
    tracing::info!(
        "Starting mflix API in {:?} mode ({:?} store)",
        settings.environment,
        settings.database.backend
    );

    // PORT is the conventional override on hosted platforms
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(args.port);

    let state = AppState::from_config(&settings);
    let app = server::app(state, &settings);

    let bind_addr = format!("{}:{}", args.bind, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("mflix API listening on http://{}", bind_addr);

    server::serve(listener, app).await.context("server error")?;
    Ok(())
}
