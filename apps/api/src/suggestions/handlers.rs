//! Axum route handlers for CV suggestions and writing tips.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::CvDocument;
use crate::session::session;
use crate::state::AppState;
use crate::suggestions::analyzer::{analyze, Suggestion};
use crate::suggestions::improvements::{enhanced_example, improvement_tips, EnhanceKind};

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub section: String,
    pub tips: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub text: String,
    pub kind: EnhanceKind,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub text: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(Json(document): Json<CvDocument>) -> Json<Vec<Suggestion>> {
    Json(analyze(&document))
}

/// GET /api/v1/sessions/:sid/suggestions
pub async fn handle_session_suggestions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    let handle = session(&state, session_id).await?;
    let suggestions = analyze(handle.lock().await.document());
    Ok(Json(suggestions))
}

/// GET /api/v1/suggestions/tips/:section
pub async fn handle_tips(Path(section): Path<String>) -> Json<TipsResponse> {
    let tips = improvement_tips(&section).to_vec();
    Json(TipsResponse { section, tips })
}

/// POST /api/v1/suggestions/enhance
pub async fn handle_enhance(Json(req): Json<EnhanceRequest>) -> Json<EnhanceResponse> {
    Json(EnhanceResponse {
        text: enhanced_example(&req.text, req.kind),
    })
}
