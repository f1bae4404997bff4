//! Relay server entry point.
//!
//! Serves `POST /api/chat` backed by either the generation process or the
//! in-process AI engine, as configured.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use proposal_builder::adapters::{app_router, ChatAppState, OpenAIConfig, OpenAIProvider, ProcessRelay};
use proposal_builder::application::GuidedReplyEngine;
use proposal_builder::config::{AppConfig, BackendKind};
use proposal_builder::ports::ReplyBackend;
use proposal_builder::telemetry::init_tracing;

fn build_backend(config: &AppConfig) -> Result<Arc<dyn ReplyBackend>> {
    match config.relay.backend {
        BackendKind::Process => {
            info!(
                program = %config.relay.program,
                args = %config.relay.args,
                "using process relay backend"
            );
            Ok(Arc::new(ProcessRelay::from_config(&config.relay)))
        }
        BackendKind::Native => {
            let provider_config =
                OpenAIConfig::from_app_config(&config.ai).context("Invalid AI configuration")?;
            let provider =
                OpenAIProvider::new(provider_config).context("Failed to create AI provider")?;
            info!(model = %config.ai.model, azure = config.ai.is_azure(), "using native backend");
            Ok(Arc::new(GuidedReplyEngine::from_config(
                Arc::new(provider),
                &config.ai,
            )))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("Invalid configuration")?;

    let backend = build_backend(&config)?;
    let state = ChatAppState::new(backend).with_session_ttl(config.server.session_ttl());
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, environment = ?config.server.environment, "relay server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}
