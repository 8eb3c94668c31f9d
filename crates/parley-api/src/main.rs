use std::sync::Arc;

use anyhow::Context;
use parley_api::{build_router, config::Config, init_logging, state::AppState};
use parley_llm::ClientFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env values override the inherited environment
    dotenvy::dotenv_override().ok();

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config);

    tracing::info!("Starting Parley chatbot");
    tracing::info!(
        model = %config.llm.model,
        style = ?config.ui.style,
        "Config loaded: {}:{}",
        config.server.host,
        config.server.port
    );

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; completions will fail until it is configured");
    }

    let client = ClientFactory::create_chat_client(
        config.llm.provider_config(config.openai_api_key.clone()),
    )
    .context("Failed to create completion client")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, client).context("Failed to build app state")?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
