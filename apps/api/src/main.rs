mod accounts;
mod assistant;
mod catalog;
mod config;
mod dashboard;
mod errors;
mod llm_client;
mod models;
mod routes;
mod scheduler;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::accounts::{AccountStore, SessionHolder, SessionState};
use crate::assistant::{ChatSessions, GeminiAgronomist};
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::scheduler::AlarmStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BerryGuard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize persistence and the stores on top of it
    let kv = storage::connect(&config).await?;
    let accounts = AccountStore::open(kv.clone()).await?;
    let alarms = AlarmStore::open(kv.clone()).await?;
    let session = match SessionHolder::restore(kv.clone()).await {
        Ok(session) => session,
        Err(e) => {
            // Left in storage untouched; the next login overwrites it.
            error!("Could not restore session, starting logged out: {e}");
            SessionHolder::new(kv)
        }
    };
    match session.state().await {
        SessionState::Active(account) => info!("Active session: '{}'", account.username),
        SessionState::LoginRequired => info!("No active session; login required"),
    }

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        accounts: Arc::new(accounts),
        session: Arc::new(session),
        alarms: Arc::new(alarms),
        chats: Arc::new(ChatSessions::new()),
        agronomist: Arc::new(GeminiAgronomist(llm)),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            // The dashboard is served from a different origin during development.
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
