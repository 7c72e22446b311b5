//! Debounced auto-save.
//!
//! Each session has at most one pending save. Scheduling aborts the pending
//! timer and arms a new one, so only the snapshot taken after the last edit
//! in a quiet period is ever written.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use uuid::Uuid;

use crate::baas::repository::DocumentRepository;
use crate::models::document::CvDocument;
use crate::session::cache::{CacheKey, LocalCache};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Clone)]
pub struct Autosaver {
    cache: Arc<dyn LocalCache>,
    repository: Arc<dyn DocumentRepository>,
    delay: Duration,
    pending: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl Autosaver {
    pub fn new(
        cache: Arc<dyn LocalCache>,
        repository: Arc<dyn DocumentRepository>,
        delay: Duration,
    ) -> Self {
        Self {
            cache,
            repository,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Arms the save for `session_id`, superseding any pending one. Signed-in
    /// sessions (`user_id` set) are also written to the repository.
    pub async fn schedule(&self, session_id: Uuid, document: CvDocument, user_id: Option<Uuid>) {
        let cache = Arc::clone(&self.cache);
        let repository = Arc::clone(&self.repository);
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            write_snapshot(cache.as_ref(), repository.as_ref(), session_id, &document, user_id)
                .await;
        });

        if let Some(previous) = self.pending.lock().await.insert(session_id, task) {
            previous.abort();
            debug!(%session_id, "Superseded pending autosave");
        }
    }

    /// Drops the pending save without writing it.
    pub async fn cancel(&self, session_id: Uuid) {
        if let Some(pending) = self.pending.lock().await.remove(&session_id) {
            pending.abort();
        }
    }
}

async fn write_snapshot(
    cache: &dyn LocalCache,
    repository: &dyn DocumentRepository,
    session_id: Uuid,
    document: &CvDocument,
    user_id: Option<Uuid>,
) {
    match serde_json::to_string(document) {
        Ok(json) => {
            if let Err(e) = cache
                .set(&CacheKey::CvData.for_session(session_id), &json)
                .await
            {
                error!(%session_id, "Autosave to local cache failed: {e}");
            }
        }
        Err(e) => error!(%session_id, "Autosave could not serialize document: {e}"),
    }

    if let Some(user_id) = user_id {
        if let Err(e) = repository.save(user_id, document).await {
            error!(%session_id, %user_id, "Autosave to cloud failed: {e}");
            return;
        }
    }
    debug!(%session_id, "Autosaved document");
}
