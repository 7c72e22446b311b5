pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::baas::handlers as baas;
use crate::document::handlers as document;
use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless API
        .route("/api/v1/layouts", get(render::handle_list_layouts))
        .route("/api/v1/render", post(render::handle_render))
        .route("/api/v1/analyze", post(suggestions::handle_analyze))
        .route(
            "/api/v1/suggestions/tips/:section",
            get(suggestions::handle_tips),
        )
        .route(
            "/api/v1/suggestions/enhance",
            post(suggestions::handle_enhance),
        )
        // Sessions
        .route("/api/v1/sessions", post(session::handle_start_session))
        .route(
            "/api/v1/sessions/:sid",
            get(session::handle_get_session).delete(session::handle_end_session),
        )
        .route("/api/v1/sessions/:sid/theme", put(session::handle_set_theme))
        .route(
            "/api/v1/sessions/:sid/appearance",
            put(session::handle_set_appearance),
        )
        // Document editing
        .route(
            "/api/v1/sessions/:sid/document",
            get(document::handle_get_document).put(document::handle_replace_document),
        )
        .route(
            "/api/v1/sessions/:sid/document/personal-info",
            put(document::handle_set_personal_info),
        )
        .route(
            "/api/v1/sessions/:sid/document/sample",
            post(document::handle_load_sample),
        )
        .route(
            "/api/v1/sessions/:sid/document/reset",
            post(document::handle_reset),
        )
        .route(
            "/api/v1/sessions/:sid/document/:section",
            put(document::handle_replace_section),
        )
        .route(
            "/api/v1/sessions/:sid/document/:section/entries",
            post(document::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:sid/document/:section/entries/:id",
            patch(document::handle_update_entry)
                .delete(document::handle_remove_entry),
        )
        // Preview & export
        .route("/api/v1/sessions/:sid/preview", get(render::handle_preview))
        .route(
            "/api/v1/sessions/:sid/export/json",
            get(document::handle_export_json),
        )
        .route(
            "/api/v1/sessions/:sid/import/json",
            post(document::handle_import_json),
        )
        .route(
            "/api/v1/sessions/:sid/export/pdf",
            get(render::handle_export_pdf),
        )
        // Generation & suggestions
        .route(
            "/api/v1/sessions/:sid/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/sessions/:sid/generate/html",
            get(generation::handle_generate_html),
        )
        .route(
            "/api/v1/sessions/:sid/generate/ai",
            post(generation::handle_generate_ai),
        )
        .route(
            "/api/v1/sessions/:sid/suggestions",
            get(suggestions::handle_session_suggestions),
        )
        // Auth & cloud persistence
        .route("/api/v1/sessions/:sid/auth/signup", post(baas::handle_sign_up))
        .route("/api/v1/sessions/:sid/auth/signin", post(baas::handle_sign_in))
        .route(
            "/api/v1/sessions/:sid/auth/signout",
            post(baas::handle_sign_out),
        )
        .route(
            "/api/v1/sessions/:sid/auth/user",
            get(baas::handle_current_user),
        )
        .route(
            "/api/v1/sessions/:sid/cloud/save",
            post(baas::handle_cloud_save),
        )
        .route(
            "/api/v1/sessions/:sid/cloud/load",
            post(baas::handle_cloud_load),
        )
        .route(
            "/api/v1/sessions/:sid/cloud",
            delete(baas::handle_cloud_delete),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body, Bytes};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::baas::auth::{AuthError, AuthProvider, AuthSession, SignUp, SupabaseAuth};
    use crate::baas::repository::MemoryRepository;
    use crate::llm_client::LlmClient;
    use crate::models::user::AuthUser;
    use crate::session::autosave::Autosaver;
    use crate::session::cache::MemoryCache;
    use crate::session::registry::SessionRegistry;

    /// Accepts any credentials and always returns the same user.
    struct StubAuth {
        user: AuthUser,
    }

    #[async_trait]
    impl AuthProvider for StubAuth {
        async fn sign_up(&self, email: &str, password: &str) -> Result<SignUp, AuthError> {
            let session = self.sign_in(email, password).await?;
            Ok(SignUp::SignedIn(session))
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthSession, AuthError> {
            Ok(AuthSession {
                user: self.user.clone(),
                access_token: "stub-token".to_string(),
            })
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
            Ok(())
        }

        async fn current_user(&self, _access_token: &str) -> Result<AuthUser, AuthError> {
            Ok(self.user.clone())
        }
    }

    fn app_with(auth: Arc<dyn AuthProvider>) -> Router {
        let cache = Arc::new(MemoryCache::default());
        let repository = Arc::new(MemoryRepository::default());
        let state = AppState {
            cache: cache.clone(),
            repository: repository.clone(),
            auth,
            llm: LlmClient::new(String::new()).unwrap(),
            sessions: SessionRegistry::default(),
            autosaver: Autosaver::new(cache, repository, Duration::from_millis(1500)),
        };
        build_router(state)
    }

    fn app() -> Router {
        app_with(Arc::new(SupabaseAuth::new("", "")))
    }

    fn stub_app() -> Router {
        app_with(Arc::new(StubAuth {
            user: AuthUser {
                id: Uuid::new_v4(),
                email: Some("ana@example.com".to_string()),
            },
        }))
    }

    async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, HeaderMap, Bytes) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, bytes) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn start_session(app: &Router) -> String {
        let (status, body) = send(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["sessionId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cvbuilder-api");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = app();
        let sid = start_session(&app).await;

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{sid}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "light");
        assert_eq!(body["mode"], "guest");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/sessions",
            Some(json!({ "sessionId": sid })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sessionId"], sid.as_str());

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{sid}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{sid}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_theme_change() {
        let app = app();
        let sid = start_session(&app).await;
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{sid}/theme"),
            Some(json!({ "theme": "dark" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "dark");
    }

    #[tokio::test]
    async fn test_entry_add_update_remove() {
        let app = app();
        let sid = start_session(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/document/experience/entries"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_u64().unwrap();
        assert_eq!(body["document"]["experience"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/sessions/{sid}/document/experience/entries/{id}"),
            Some(json!({ "field": "jobTitle", "value": "Lead" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"][0]["jobTitle"], "Lead");

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/sessions/{sid}/document/experience/entries/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["experience"].as_array().unwrap().is_empty());

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/sessions/{sid}/document/experience/entries/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["experience"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_section_is_rejected() {
        let app = app();
        let sid = start_session(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/document/hobbies/entries"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_bad_import_leaves_document_unchanged() {
        let app = app();
        let sid = start_session(&app).await;
        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;

        let (status, _, _) = send_raw(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/import/json"),
            Some(r#"{"unrelated": true}"#.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{sid}/document"), None).await;
        assert_eq!(body["personalInfo"]["name"], "Alex Johnson");
    }

    #[tokio::test]
    async fn test_export_then_import_json() {
        let app = app();
        let sid = start_session(&app).await;
        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;

        let (status, headers, exported) = send_raw(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{sid}/export/json"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("Alex_Johnson_data.json"));

        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/reset"), None).await;
        let (status, _, body) = send_raw(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/import/json"),
            Some(String::from_utf8(exported.to_vec()).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let document: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(document["personalInfo"]["name"], "Alex Johnson");
    }

    #[tokio::test]
    async fn test_preview_html_and_layout_override() {
        let app = app();
        let sid = start_session(&app).await;
        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;

        let (status, headers, body) = send_raw(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{sid}/preview?format=html&layout=classic"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("cv-classic"));

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{sid}/preview"), None).await;
        assert_eq!(body["layout"], "modern");
    }

    #[tokio::test]
    async fn test_stateless_render_and_layouts() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/layouts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/render",
            Some(json!({ "document": {}, "layout": "two-column" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"], "two-column");
    }

    #[tokio::test]
    async fn test_export_pdf() {
        let app = app();
        let sid = start_session(&app).await;
        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;

        let (status, headers, body) = send_raw(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{sid}/export/pdf"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("Alex_Johnson_CV.pdf"));
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_exports_require_name() {
        let app = app();
        let sid = start_session(&app).await;

        for format in ["pdf", "json"] {
            let (status, headers, body) = send_raw(
                &app,
                Method::GET,
                &format!("/api/v1/sessions/{sid}/export/{format}"),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{format}");
            assert!(headers.get(header::CONTENT_DISPOSITION).is_none());
            let body: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }

        send(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{sid}/document/personal-info"),
            Some(json!({ "name": "   " })),
        )
        .await;
        let (status, _, _) = send_raw(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{sid}/export/pdf"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_requires_name() {
        let app = app();
        let sid = start_session(&app).await;
        let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/generate"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;
        let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/generate"), None).await;
        assert_eq!(status, StatusCode::OK);
        let text = body["text"].as_str().unwrap();
        assert!(text.starts_with("Alex Johnson\n"));
        assert!(text.contains("PROFESSIONAL PROFILE"));
    }

    #[tokio::test]
    async fn test_ai_generation_without_key() {
        let app = app();
        let sid = start_session(&app).await;
        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;
        let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/generate/ai"), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_suggestions_endpoints() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/v1/analyze", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s["severity"] == "error"));

        let (_, body) = send(&app, Method::GET, "/api/v1/suggestions/tips/summary", None).await;
        assert_eq!(body["tips"].as_array().unwrap().len(), 4);

        let (_, body) = send(&app, Method::GET, "/api/v1/suggestions/tips/projects", None).await;
        assert!(body["tips"].as_array().unwrap().is_empty());

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/suggestions/enhance",
            Some(json!({ "text": "did things", "kind": "unknown" })),
        )
        .await;
        assert_eq!(body["text"], "did things");
    }

    #[tokio::test]
    async fn test_sign_up_validation_precedes_network() {
        let app = app();
        let sid = start_session(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/auth/signup"),
            Some(json!({ "email": "ana@example.com", "password": "123" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_cloud_requires_sign_in() {
        let app = app();
        let sid = start_session(&app).await;
        let (status, _) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/cloud/save"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, Method::GET, &format!("/api/v1/sessions/{sid}/auth/user"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cloud_save_and_load_round_trip() {
        let app = stub_app();
        let sid = start_session(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/auth/signin"),
            Some(json!({ "email": "ana@example.com", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "signed_in");

        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;
        let (status, _) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/cloud/save"), None).await;
        assert_eq!(status, StatusCode::OK);

        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/reset"), None).await;
        let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/cloud/load"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personalInfo"]["name"], "Alex Johnson");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{sid}/cloud"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/cloud/load"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sign_out_clears_document() {
        let app = stub_app();
        let sid = start_session(&app).await;
        send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{sid}/auth/signin"),
            Some(json!({ "email": "ana@example.com", "password": "secret1" })),
        )
        .await;
        send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/document/sample"), None).await;

        let (status, body) = send(&app, Method::POST, &format!("/api/v1/sessions/{sid}/auth/signout"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "signed_out");
        assert!(body["user"].is_null());

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{sid}/document"), None).await;
        assert_eq!(body["personalInfo"]["name"], "");
    }
}
