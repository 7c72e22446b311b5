//! Axum route handlers for sign-in and cloud persistence of a session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::baas::auth::{validate_sign_in, validate_sign_up, SignUp};
use crate::document::store::DocumentAction;
use crate::errors::AppError;
use crate::models::document::CvDocument;
use crate::models::user::AuthUser;
use crate::session::context::ContextSummary;
use crate::session::{commit, session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequired {
    pub confirmation_required: bool,
    pub user: AuthUser,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CloudSaved {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Auth
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:sid/auth/signup
///
/// 200 with the signed-in context, or 202 when the provider wants the email
/// confirmed before a session is issued.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response, AppError> {
    validate_sign_up(&req.email, &req.password)?;
    let handle = session(&state, session_id).await?;

    match state.auth.sign_up(req.email.trim(), &req.password).await? {
        SignUp::SignedIn(auth) => {
            let mut context = handle.lock().await;
            context.sign_in(auth, state.cache.as_ref()).await?;
            Ok(Json(context.summary()).into_response())
        }
        SignUp::ConfirmationRequired(user) => {
            info!(%session_id, user_id = %user.id, "Sign-up awaiting email confirmation");
            let body = ConfirmationRequired {
                confirmation_required: true,
                user,
                message: "Check your email to confirm your account",
            };
            Ok((StatusCode::ACCEPTED, Json(body)).into_response())
        }
    }
}

/// POST /api/v1/sessions/:sid/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<ContextSummary>, AppError> {
    validate_sign_in(&req.email, &req.password)?;
    let handle = session(&state, session_id).await?;

    let auth = state.auth.sign_in(req.email.trim(), &req.password).await?;
    let mut context = handle.lock().await;
    context.sign_in(auth, state.cache.as_ref()).await?;
    Ok(Json(context.summary()))
}

/// POST /api/v1/sessions/:sid/auth/signout
///
/// Also used to leave guest mode explicitly. The local document and the
/// pending auto-save are dropped.
pub async fn handle_sign_out(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ContextSummary>, AppError> {
    let handle = session(&state, session_id).await?;
    let mut context = handle.lock().await;

    if let Some(auth) = context.auth() {
        state.auth.sign_out(&auth.access_token).await?;
    }
    state.autosaver.cancel(session_id).await;
    context.sign_out(state.cache.as_ref()).await?;
    Ok(Json(context.summary()))
}

/// GET /api/v1/sessions/:sid/auth/user
pub async fn handle_current_user(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AuthUser>, AppError> {
    let handle = session(&state, session_id).await?;
    let token = handle
        .lock()
        .await
        .auth()
        .map(|auth| auth.access_token.clone())
        .ok_or(AppError::Unauthorized)?;
    let user = state.auth.current_user(&token).await?;
    Ok(Json(user))
}

// ────────────────────────────────────────────────────────────────────────────
// Cloud persistence
// ────────────────────────────────────────────────────────────────────────────

async fn signed_in_user(state: &AppState, session_id: Uuid) -> Result<(Uuid, CvDocument), AppError> {
    let handle = session(state, session_id).await?;
    let context = handle.lock().await;
    let user_id = context.user_id().ok_or(AppError::Unauthorized)?;
    Ok((user_id, context.document().clone()))
}

/// POST /api/v1/sessions/:sid/cloud/save
pub async fn handle_cloud_save(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CloudSaved>, AppError> {
    let (user_id, document) = signed_in_user(&state, session_id).await?;
    state.repository.save(user_id, &document).await?;
    Ok(Json(CloudSaved { user_id }))
}

/// POST /api/v1/sessions/:sid/cloud/load
///
/// Replaces the session's document with the stored one.
pub async fn handle_cloud_load(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CvDocument>, AppError> {
    let (user_id, _) = signed_in_user(&state, session_id).await?;
    let document = state
        .repository
        .load(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No saved CV for user {user_id}")))?;
    let reduced = commit(&state, session_id, DocumentAction::Replace(document)).await?;
    Ok(Json(reduced.document))
}

/// DELETE /api/v1/sessions/:sid/cloud
pub async fn handle_cloud_delete(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let (user_id, _) = signed_in_user(&state, session_id).await?;
    state.repository.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
