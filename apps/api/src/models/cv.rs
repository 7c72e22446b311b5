use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of `cvs`: the whole document as JSONB, keyed by user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvRow {
    pub user_id: Uuid,
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
