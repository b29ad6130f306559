//! Honeypot Agent server binary.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use honeypot_agent::adapters::ai::CandidateChain;
use honeypot_agent::adapters::callback::{HttpResultSink, LoggingResultSink};
use honeypot_agent::adapters::http::{app_router, ApiKeyState, HoneypotAppState};
use honeypot_agent::application::ProcessMessageHandler;
use honeypot_agent::config::{AppConfig, CallbackConfig, ServerConfig};
use honeypot_agent::ports::ResultSink;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let chain = CandidateChain::new(config.ai.backend_descriptors()).with_timeout(config.ai.timeout());
    tracing::info!(
        candidates = ?chain.candidates().iter().map(|c| c.label()).collect::<Vec<_>>(),
        timeout_secs = config.ai.timeout_secs,
        "Generation candidates configured"
    );

    let handler = ProcessMessageHandler::new(Arc::new(chain), result_sink(&config.callback))
        .with_generation_deadline(config.generation_deadline());
    let app = app_router(
        HoneypotAppState::new(handler),
        ApiKeyState::from_config(&config.auth),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Honeypot agent listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Honeypot agent stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over config.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn result_sink(callback: &CallbackConfig) -> Arc<dyn ResultSink> {
    match callback.endpoint() {
        Some(url) => {
            tracing::info!(url = %url, "Reporting results to callback endpoint");
            Arc::new(HttpResultSink::new(url).with_timeout(callback.timeout()))
        }
        None => {
            tracing::info!("No callback endpoint configured, results will only be logged");
            Arc::new(LoggingResultSink)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
