//! Axum route handlers for previews, layout listing and PDF export.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::cv_generator::require_name;
use crate::models::document::CvDocument;
use crate::render::html::render_html;
use crate::render::layout::{LayoutInfo, LayoutName};
use crate::render::pdf::{pdf_file_name, render_pdf};
use crate::render::style::StyleOverrides;
use crate::render::tree::{render, render_named, RenderedCv};
use crate::session::session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewFormat {
    #[default]
    Json,
    Html,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreviewQuery {
    pub format: PreviewFormat,
    /// Overrides the session's layout for this preview only.
    pub layout: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub document: CvDocument,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub style: StyleOverrides,
}

fn respond(cv: RenderedCv, format: PreviewFormat) -> Result<Response, AppError> {
    match format {
        PreviewFormat::Json => Ok(Json(cv).into_response()),
        PreviewFormat::Html => {
            let html = render_html(&cv).map_err(anyhow::Error::from)?;
            Ok(Html(html).into_response())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/layouts
pub async fn handle_list_layouts() -> Json<Vec<LayoutInfo>> {
    Json(LayoutName::ALL.iter().map(LayoutName::info).collect())
}

/// POST /api/v1/render
///
/// Stateless render of a posted document.
pub async fn handle_render(
    Query(query): Query<PreviewQuery>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let layout = req.layout.or(query.layout).unwrap_or_default();
    let cv = render_named(&req.document, &layout, &req.style);
    respond(cv, query.format)
}

/// GET /api/v1/sessions/:sid/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let handle = session(&state, session_id).await?;
    let cv = {
        let context = handle.lock().await;
        let layout = query
            .layout
            .as_deref()
            .map(LayoutName::lookup)
            .unwrap_or_else(|| context.layout());
        render(context.document(), layout, context.style())
    };
    respond(cv, query.format)
}

/// GET /api/v1/sessions/:sid/export/pdf
///
/// Renders the session's document with its active layout and style. A blank
/// name is rejected before anything is rendered.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = session(&state, session_id).await?;
    let (cv, name, layout) = {
        let context = handle.lock().await;
        let document = context.document();
        require_name(&document.personal_info.name)?;
        (
            render(document, context.layout(), context.style()),
            document.personal_info.name.clone(),
            context.layout(),
        )
    };

    let file_name = pdf_file_name(&name);
    let title = file_name.trim_end_matches(".pdf").to_string();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&cv, &title))
        .await
        .map_err(anyhow::Error::from)??;

    info!(%session_id, layout = layout.as_str(), size = bytes.len(), "Exported PDF");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}
