use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::cv::CvRow;
use crate::models::document::CvDocument;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored document is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Whole-document persistence keyed by user id.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert or replace the user's document.
    async fn save(&self, user_id: Uuid, document: &CvDocument) -> Result<(), RepositoryError>;
    async fn load(&self, user_id: Uuid) -> Result<Option<CvDocument>, RepositoryError>;
    async fn delete(&self, user_id: Uuid) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn save(&self, user_id: Uuid, document: &CvDocument) -> Result<(), RepositoryError> {
        let data = serde_json::to_value(document)?;
        sqlx::query(
            r#"
            INSERT INTO cvs (user_id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        info!(%user_id, "Saved CV document");
        Ok(())
    }

    async fn load(&self, user_id: Uuid) -> Result<Option<CvDocument>, RepositoryError> {
        let row: Option<CvRow> =
            sqlx::query_as("SELECT user_id, data, updated_at FROM cvs WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        match row {
            Some(row) => Ok(Some(serde_json::from_value(row.data)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cvs WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        info!(%user_id, "Deleted CV document");
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryRepository;
