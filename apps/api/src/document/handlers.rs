//! Axum route handlers for editing a session's document.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::document::store::{DocumentAction, Section};
use crate::document::transfer::{export_json, import_json, json_file_name};
use crate::errors::AppError;
use crate::generation::cv_generator::require_name;
use crate::models::document::{CvDocument, EntryId, PersonalInfo};
use crate::session::{commit, session};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EntryCreated {
    pub id: EntryId,
    pub document: CvDocument,
}

/// `{"field": "jobTitle", "value": "Lead"}`
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub field: String,
    pub value: Value,
}

fn parse_section(raw: &str) -> Result<Section, AppError> {
    raw.parse::<Section>().map_err(AppError::from)
}

/// GET /api/v1/sessions/:sid/document
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CvDocument>, AppError> {
    let handle = session(&state, session_id).await?;
    let document = handle.lock().await.document().clone();
    Ok(Json(document))
}

/// PUT /api/v1/sessions/:sid/document
pub async fn handle_replace_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(document): Json<CvDocument>,
) -> Result<Json<CvDocument>, AppError> {
    let reduced = commit(&state, session_id, DocumentAction::Replace(document)).await?;
    Ok(Json(reduced.document))
}

/// PUT /api/v1/sessions/:sid/document/personal-info
pub async fn handle_set_personal_info(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(info): Json<PersonalInfo>,
) -> Result<Json<CvDocument>, AppError> {
    let reduced = commit(&state, session_id, DocumentAction::SetPersonalInfo(info)).await?;
    Ok(Json(reduced.document))
}

/// POST /api/v1/sessions/:sid/document/sample
pub async fn handle_load_sample(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CvDocument>, AppError> {
    let reduced = commit(&state, session_id, DocumentAction::Replace(CvDocument::sample())).await?;
    Ok(Json(reduced.document))
}

/// POST /api/v1/sessions/:sid/document/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CvDocument>, AppError> {
    let reduced = commit(&state, session_id, DocumentAction::Replace(CvDocument::default())).await?;
    Ok(Json(reduced.document))
}

/// PUT /api/v1/sessions/:sid/document/:section
pub async fn handle_replace_section(
    State(state): State<AppState>,
    Path((session_id, section)): Path<(Uuid, String)>,
    Json(entries): Json<Value>,
) -> Result<Json<CvDocument>, AppError> {
    let section = parse_section(&section)?;
    let reduced = commit(
        &state,
        session_id,
        DocumentAction::ReplaceSection { section, entries },
    )
    .await?;
    Ok(Json(reduced.document))
}

/// POST /api/v1/sessions/:sid/document/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((session_id, section)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<EntryCreated>), AppError> {
    let section = parse_section(&section)?;
    let reduced = commit(&state, session_id, DocumentAction::add(section)).await?;
    let id = reduced
        .created
        .ok_or_else(|| anyhow::anyhow!("add action produced no entry id"))?;
    Ok((
        StatusCode::CREATED,
        Json(EntryCreated {
            id,
            document: reduced.document,
        }),
    ))
}

/// PATCH /api/v1/sessions/:sid/document/:section/entries/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((session_id, section, id)): Path<(Uuid, String, u64)>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<CvDocument>, AppError> {
    let section = parse_section(&section)?;
    let reduced = commit(
        &state,
        session_id,
        DocumentAction::UpdateEntry {
            section,
            id: EntryId(id),
            field: req.field,
            value: req.value,
        },
    )
    .await?;
    Ok(Json(reduced.document))
}

/// DELETE /api/v1/sessions/:sid/document/:section/entries/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((session_id, section, id)): Path<(Uuid, String, u64)>,
) -> Result<Json<CvDocument>, AppError> {
    let section = parse_section(&section)?;
    let reduced = commit(
        &state,
        session_id,
        DocumentAction::RemoveEntry {
            section,
            id: EntryId(id),
        },
    )
    .await?;
    Ok(Json(reduced.document))
}

/// GET /api/v1/sessions/:sid/export/json
pub async fn handle_export_json(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = session(&state, session_id).await?;
    let document = handle.lock().await.document().clone();
    require_name(&document.personal_info.name)?;
    let body = export_json(&document).map_err(anyhow::Error::from)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        json_file_name(&document.personal_info.name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// POST /api/v1/sessions/:sid/import/json
///
/// Takes the raw file contents. On any failure the current document is kept.
pub async fn handle_import_json(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<CvDocument>, AppError> {
    let raw = std::str::from_utf8(&body)
        .map_err(|_| AppError::Validation("Import failed: file is not UTF-8 text".to_string()))?;
    let document = import_json(raw)?;
    let reduced = commit(&state, session_id, DocumentAction::Replace(document)).await?;
    info!(%session_id, "Imported CV document");
    Ok(Json(reduced.document))
}
