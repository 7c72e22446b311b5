//! Explicit application context for one editing session.
//!
//! Loaded from the local cache when the session starts, written back when
//! the theme or auth state changes, and cleared on sign-out. The document
//! itself is only changed through `apply`; persistence of document edits is
//! the autosaver's job.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::baas::auth::AuthSession;
use crate::document::store::{reduce, DocumentAction, DocumentError, Reduced};
use crate::models::document::CvDocument;
use crate::models::user::AuthUser;
use crate::render::layout::LayoutName;
use crate::render::style::{resolve_style, ResolvedStyle, StyleOverrides};
use crate::session::cache::{CacheError, CacheKey, LocalCache};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Guest: never signed in. SignedOut: explicitly signed out, stays local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Guest,
    SignedOut,
    SignedIn,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSummary {
    pub session_id: Uuid,
    pub theme: Theme,
    pub mode: SessionMode,
    pub user: Option<AuthUser>,
    pub layout: LayoutName,
    pub style: ResolvedStyle,
}

#[derive(Debug, Clone)]
pub struct AppContext {
    session_id: Uuid,
    theme: Theme,
    mode: SessionMode,
    auth: Option<AuthSession>,
    layout: LayoutName,
    style: StyleOverrides,
    document: CvDocument,
}

impl AppContext {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            theme: Theme::default(),
            mode: SessionMode::Guest,
            auth: None,
            layout: LayoutName::default(),
            style: StyleOverrides::default(),
            document: CvDocument::default(),
        }
    }

    /// Restores theme, signed-out flag and the cached document. Unreadable
    /// cached values are ignored.
    pub async fn load(session_id: Uuid, cache: &dyn LocalCache) -> Result<Self, CacheError> {
        let mut context = Self::new(session_id);

        if let Some(theme) = cache.get(&CacheKey::Theme.for_session(session_id)).await? {
            match Theme::parse(&theme) {
                Some(theme) => context.theme = theme,
                None => warn!(%session_id, "Ignoring cached theme {theme:?}"),
            }
        }

        let signed_out = cache
            .get(&CacheKey::SignedOut.for_session(session_id))
            .await?;
        if signed_out.as_deref() == Some("true") {
            context.mode = SessionMode::SignedOut;
        }

        if let Some(raw) = cache.get(&CacheKey::CvData.for_session(session_id)).await? {
            match serde_json::from_str(&raw) {
                Ok(document) => context.document = document,
                Err(e) => warn!(%session_id, "Discarding unreadable cached document: {e}"),
            }
        }

        info!(%session_id, mode = ?context.mode, "Session context loaded");
        Ok(context)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn document(&self) -> &CvDocument {
        &self.document
    }

    #[cfg(test)]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[cfg(test)]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn layout(&self) -> LayoutName {
        self.layout
    }

    pub fn style(&self) -> &StyleOverrides {
        &self.style
    }

    pub fn auth(&self) -> Option<&AuthSession> {
        self.auth.as_ref()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.auth.as_ref().map(|a| a.user.id)
    }

    /// Runs one document action. On error the document is unchanged.
    pub fn apply(&mut self, action: DocumentAction) -> Result<Reduced, DocumentError> {
        let reduced = reduce(&self.document, action)?;
        self.document = reduced.document.clone();
        Ok(reduced)
    }

    pub fn set_appearance(&mut self, layout: Option<&str>, style: Option<StyleOverrides>) {
        if let Some(layout) = layout {
            self.layout = LayoutName::lookup(layout);
        }
        if let Some(style) = style {
            self.style = style;
        }
    }

    pub async fn set_theme(&mut self, theme: Theme, cache: &dyn LocalCache) -> Result<(), CacheError> {
        cache
            .set(&CacheKey::Theme.for_session(self.session_id), theme.as_str())
            .await?;
        self.theme = theme;
        Ok(())
    }

    pub async fn sign_in(&mut self, session: AuthSession, cache: &dyn LocalCache) -> Result<(), CacheError> {
        cache
            .delete(&CacheKey::SignedOut.for_session(self.session_id))
            .await?;
        info!(session_id = %self.session_id, user_id = %session.user.id, "Signed in");
        self.auth = Some(session);
        self.mode = SessionMode::SignedIn;
        Ok(())
    }

    /// Drops the auth session and the locally cached document, and marks the
    /// session as explicitly signed out.
    pub async fn sign_out(&mut self, cache: &dyn LocalCache) -> Result<(), CacheError> {
        cache
            .delete(&CacheKey::CvData.for_session(self.session_id))
            .await?;
        cache
            .set(&CacheKey::SignedOut.for_session(self.session_id), "true")
            .await?;
        info!(session_id = %self.session_id, "Signed out");
        self.auth = None;
        self.mode = SessionMode::SignedOut;
        self.document = CvDocument::default();
        Ok(())
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            session_id: self.session_id,
            theme: self.theme,
            mode: self.mode,
            user: self.auth.as_ref().map(|a| a.user.clone()),
            layout: self.layout,
            style: resolve_style(&self.style),
        }
    }
}
