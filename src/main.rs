mod analysis;
mod config;
mod error;
mod form;
mod heuristic;
mod images;
mod models;
mod openai;
mod prompt;
mod report;
mod routes;
mod sections;
mod video;

#[cfg(test)]
mod testing;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    analysis::{Analyzer, AnalyzerSettings},
    config::AppConfig,
    openai::OpenAiClient,
    routes::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Arc::new(AppConfig::from_env());
    let client = OpenAiClient::new(&config)?;
    tracing::info!(
        "Using {} at {} (fallback key configured: {}, video profile: {})",
        client.model(),
        config.openai_api_base,
        config.fallback_api_key.is_some(),
        config.video_profile_enabled
    );

    let state = AppState {
        analyzer: Arc::new(Analyzer::new(Arc::new(client), AnalyzerSettings::from(config.as_ref()))),
        config: config.clone(),
    };
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
