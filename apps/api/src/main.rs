mod chat;
mod config;
mod errors;
mod llm_client;
mod profile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio Chat API v{}", env!("CARGO_PKG_VERSION"));

    // Fetch and extract the profile document. Strictly sequential: the
    // listener does not bind until the profile text is in memory.
    let http = reqwest::Client::new();
    let profile_text: Arc<str> = Arc::from(profile::load(&http, &config.drive_file_id).await?);

    // Initialize LLM client
    let llm = LlmClient::new(
        config.model_provider,
        config.model_name.clone(),
        config.api_key.clone(),
    );
    info!(
        "LLM client initialized (provider: {}, model: {})",
        llm.provider(),
        llm.model()
    );

    let cors = cors_layer(&config.allowed_origins)?;
    let port = config.port;

    // Build app state
    let state = AppState {
        llm,
        profile_text,
        config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Default log directive scoped to this crate when RUST_LOG is unset.
/// The package name uses a hyphen but tracing targets follow the module
/// path, so the name must be underscored for the filter to match.
fn default_log_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}
