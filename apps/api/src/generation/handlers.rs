//! Axum route handlers for the CV generator and the AI writer.

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::cv_generator::{generate, require_name, GenerateInput, GeneratedCv};
use crate::generation::prompts::build_ai_prompt;
use crate::session::session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AiCvResponse {
    pub text: String,
}

async fn generator_input(state: &AppState, session_id: Uuid) -> Result<GenerateInput, AppError> {
    let handle = session(state, session_id).await?;
    let input = GenerateInput::from(handle.lock().await.document());
    require_name(&input.name)?;
    Ok(input)
}

/// POST /api/v1/sessions/:sid/generate
///
/// Rule-based generation from the session's document. Works offline.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GeneratedCv>, AppError> {
    let input = generator_input(&state, session_id).await?;
    let generated = generate(&input)?;
    info!(%session_id, "Generated CV for {}", input.name);
    Ok(Json(generated))
}

/// GET /api/v1/sessions/:sid/generate/html
///
/// The standalone HTML document, ready to save or print.
pub async fn handle_generate_html(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let input = generator_input(&state, session_id).await?;
    Ok(Html(generate(&input)?.html))
}

/// POST /api/v1/sessions/:sid/generate/ai
///
/// Sends the writer prompt to the LLM and returns its text verbatim.
pub async fn handle_generate_ai(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AiCvResponse>, AppError> {
    let input = generator_input(&state, session_id).await?;
    let prompt = build_ai_prompt(&input);
    let text = state.llm.generate_text(&prompt).await?;
    info!(%session_id, "AI CV generated ({} chars)", text.len());
    Ok(Json(AiCvResponse { text }))
}
