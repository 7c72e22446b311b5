// Application context per editing session: local cache, auto-save, registry.

pub mod autosave;
pub mod cache;
pub mod context;
pub mod handlers;
pub mod registry;

use uuid::Uuid;

use crate::document::store::{DocumentAction, Reduced};
use crate::errors::AppError;
use crate::session::registry::SessionHandle;
use crate::state::AppState;

/// Looks up a live session.
pub async fn session(state: &AppState, session_id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

/// Applies `action` to the session's document and arms the auto-save with
/// the new snapshot. A failed action changes nothing and saves nothing.
pub async fn commit(
    state: &AppState,
    session_id: Uuid,
    action: DocumentAction,
) -> Result<Reduced, AppError> {
    let handle = session(state, session_id).await?;
    let mut context = handle.lock().await;
    let reduced = context.apply(action)?;
    state
        .autosaver
        .schedule(session_id, reduced.document.clone(), context.user_id())
        .await;
    Ok(reduced)
}
