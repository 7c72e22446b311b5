use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::session::context::AppContext;

/// A session's context. Holding the lock serializes edits to that session.
pub type SessionHandle = Arc<Mutex<AppContext>>;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    /// Registers `context`, keeping an already-registered session with the same id.
    pub async fn insert(&self, context: AppContext) -> SessionHandle {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(context.session_id())
            .or_insert_with(|| Arc::new(Mutex::new(context)))
            .clone()
    }

    pub async fn get(&self, session_id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    pub async fn remove(&self, session_id: Uuid) -> Option<SessionHandle> {
        self.sessions.write().await.remove(&session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
