//! Process bootstrap: configuration, logging, wiring, and the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tripdesk::adapters::ai::{OpenAiConfig, OpenAiProvider};
use tripdesk::adapters::http::{routes, AppState};
use tripdesk::adapters::memory::{InMemoryQuotaTracker, InMemorySessionStore};
use tripdesk::application::IntakeOrchestrator;
use tripdesk::config::AppConfig;
use tripdesk::domain::access::AuthorizationGate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let gate = AuthorizationGate::from_allow_list(&config.access.allowed_travelers);
    if gate.is_empty() {
        tracing::warn!("allow-list is empty or malformed; all callers will be denied");
    } else {
        tracing::info!(authorized = gate.len(), "authorization gate configured");
    }

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or("OpenAI API key missing")?;
    let provider = Arc::new(OpenAiProvider::new(
        OpenAiConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?);

    let quota = Arc::new(InMemoryQuotaTracker::new(config.limits.turn_quota));
    let sessions = Arc::new(InMemorySessionStore::new());

    let orchestrator = Arc::new(IntakeOrchestrator::new(
        gate,
        quota,
        sessions,
        provider,
        &config.limits,
    ));

    let app = routes()
        .with_state(AppState::new(orchestrator))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "tripdesk listening");

    axum::serve(listener, app).await?;

    Ok(())
}
