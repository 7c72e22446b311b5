//! Email/password auth against a Supabase-style GoTrue REST API.
//!
//! Credentials are checked locally first; a request is only built once they
//! pass and the provider is configured. Nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::user::AuthUser;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Auth service is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected auth response: {0}")]
    UnexpectedResponse(String),
}

/// A signed-in user and the bearer token for later calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    pub user: AuthUser,
    #[serde(skip_serializing)]
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUp {
    SignedIn(AuthSession),
    /// Account created; the provider wants the email confirmed first.
    ConfirmationRequired(AuthUser),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUp, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    async fn current_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

pub fn validate_sign_up(email: &str, password: &str) -> Result<(), AuthError> {
    validate_sign_in(email, password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<String, AuthError> {
        if self.base_url.is_empty() || self.anon_key.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        Ok(format!("{}/auth/v1/{path}", self.base_url))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, AuthError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed
                .msg
                .or(parsed.error_description)
                .or(parsed.message)
                .unwrap_or_else(|| status_message(status));
            warn!("Auth provider rejected request ({status}): {message}");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| AuthError::UnexpectedResponse(e.to_string()))
    }
}

fn status_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Authentication failed")
        .to_string()
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, AuthError> {
    serde_json::from_value(value).map_err(|e| AuthError::UnexpectedResponse(e.to_string()))
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUp, AuthError> {
        validate_sign_up(email, password)?;
        let url = self.endpoint("signup")?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = Self::read_json(response).await?;
        if body.get("access_token").is_some() {
            let token: TokenResponse = parse(body)?;
            debug!(user_id = %token.user.id, "Sign-up returned a session");
            Ok(SignUp::SignedIn(AuthSession {
                user: token.user,
                access_token: token.access_token,
            }))
        } else {
            Ok(SignUp::ConfirmationRequired(parse(body)?))
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        validate_sign_in(email, password)?;
        let url = self.endpoint("token?grant_type=password")?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let token: TokenResponse = parse(Self::read_json(response).await?)?;
        Ok(AuthSession {
            user: token.user,
            access_token: token.access_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("logout")?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::read_json(response).await?;
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let url = self.endpoint("user")?;
        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        parse(Self::read_json(response).await?)
    }
}
