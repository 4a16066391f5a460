mod ai;
mod config;
mod db;
mod errors;
mod llm_client;
mod metering;
mod models;
mod routes;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::metering::{EntitlementGate, PgMeteringStore, SystemClock};
use crate::routes::build_router;
use crate::settings::store::{CachedSettings, PgSettingsStore};
use crate::settings::SettingsProvider;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    let default_filter = format!(
        "{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        &config.rust_log
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sira API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Settings provider: Postgres store behind the read-through cache.
    // Admin writes go through the same instance, so invalidation works.
    let settings: Arc<dyn SettingsProvider> =
        Arc::new(CachedSettings::new(Arc::new(PgSettingsStore::new(db.clone()))));
    info!("Settings provider initialized");

    // Entitlement gate over the metering store and the system clock
    let gate = EntitlementGate::new(
        Arc::new(PgMeteringStore::new(db.clone())),
        Arc::new(SystemClock),
    );
    info!("Entitlement gate initialized");

    // Build app state
    let state = AppState {
        llm,
        settings,
        gate,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
