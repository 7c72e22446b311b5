use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as reported by the auth provider. The id keys cloud-saved documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}
