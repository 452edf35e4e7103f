//! Dump.do Web Server
//!
//! Run with: cargo run -p dumpdo-web

use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Dump.do server...");

    let config = dumpdo_web::config::Config::load()?;
    let state = dumpdo_web::state::AppState::from_config(&config)?;
    if state.auth_token.is_none() {
        tracing::warn!("DUMPDO_API_TOKEN not set, API auth is disabled");
    }

    let app = dumpdo_web::router::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
