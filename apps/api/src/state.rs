use std::sync::Arc;

use crate::baas::auth::AuthProvider;
use crate::baas::repository::DocumentRepository;
use crate::llm_client::LlmClient;
use crate::session::autosave::Autosaver;
use crate::session::cache::LocalCache;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Browser-local-storage equivalent. Redis in production.
    pub cache: Arc<dyn LocalCache>,
    /// Cloud document storage keyed by user id. PostgreSQL in production.
    pub repository: Arc<dyn DocumentRepository>,
    pub auth: Arc<dyn AuthProvider>,
    pub llm: LlmClient,
    pub sessions: SessionRegistry,
    pub autosaver: Autosaver,
}
