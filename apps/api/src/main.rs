mod baas;
mod config;
mod db;
mod document;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::baas::auth::SupabaseAuth;
use crate::baas::repository::PgDocumentRepository;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::autosave::Autosaver;
use crate::session::cache::RedisCache;
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (cloud document storage)
    let db = create_pool(&config.database_url).await?;
    let repository = Arc::new(PgDocumentRepository::new(db));

    // Initialize Redis (per-session local cache)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = Arc::new(RedisCache::new(redis));
    info!("Redis client initialized");

    // Initialize external services
    let auth = Arc::new(SupabaseAuth::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    ));
    if config.supabase_url.is_empty() {
        warn!("SUPABASE_URL is not set; sign-in and cloud saves are unavailable");
    }

    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("GEMINI_API_KEY is not set; AI generation is unavailable");
    }

    let autosaver = Autosaver::new(
        cache.clone(),
        repository.clone(),
        Duration::from_millis(config.autosave_debounce_ms),
    );
    info!("Autosave debounce: {}ms", config.autosave_debounce_ms);

    // Build app state
    let state = AppState {
        cache,
        repository,
        auth,
        llm,
        sessions: SessionRegistry::default(),
        autosaver,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(errors::panic_response))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict allowed origins once the web client's domain is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
