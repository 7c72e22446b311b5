//! Axum route handlers for session lifecycle and appearance.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::style::StyleOverrides;
use crate::session::context::{AppContext, ContextSummary, Theme};
use crate::session::session;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartSessionRequest {
    /// Resume a previous session; a new id is minted when absent.
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppearanceRequest {
    pub layout: Option<String>,
    pub style: Option<StyleOverrides>,
}

/// POST /api/v1/sessions
pub async fn handle_start_session(
    State(state): State<AppState>,
    body: Option<Json<StartSessionRequest>>,
) -> Result<(StatusCode, Json<ContextSummary>), AppError> {
    let request = body.map(|Json(req)| req).unwrap_or_default();
    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);

    if let Some(existing) = state.sessions.get(session_id).await {
        let summary = existing.lock().await.summary();
        return Ok((StatusCode::OK, Json(summary)));
    }

    let context = AppContext::load(session_id, state.cache.as_ref()).await?;
    let handle = state.sessions.insert(context).await;
    let summary = handle.lock().await.summary();
    info!(%session_id, "Session started");
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/sessions/:sid
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ContextSummary>, AppError> {
    let handle = session(&state, session_id).await?;
    let summary = handle.lock().await.summary();
    Ok(Json(summary))
}

/// DELETE /api/v1/sessions/:sid
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    state.autosaver.cancel(session_id).await;
    info!(%session_id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:sid/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ThemeRequest>,
) -> Result<Json<ContextSummary>, AppError> {
    let handle = session(&state, session_id).await?;
    let mut context = handle.lock().await;
    context.set_theme(req.theme, state.cache.as_ref()).await?;
    Ok(Json(context.summary()))
}

/// PUT /api/v1/sessions/:sid/appearance
pub async fn handle_set_appearance(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<AppearanceRequest>,
) -> Result<Json<ContextSummary>, AppError> {
    let handle = session(&state, session_id).await?;
    let mut context = handle.lock().await;
    context.set_appearance(req.layout.as_deref(), req.style);
    Ok(Json(context.summary()))
}
