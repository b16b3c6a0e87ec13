use serde_json::Value;

use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::site_document::DocumentKind;
use crate::utils::time::current_timestamp_seconds;

pub struct SiteDocumentService<'a> {
    db: &'a Database,
}

impl<'a> SiteDocumentService<'a> {
    pub fn new(db: &'a Database) -> Self {
        SiteDocumentService { db }
    }

    /// Stored document, or the kind's default when it was never written.
    pub async fn get(&self, kind: DocumentKind) -> AppResult<Value> {
        let data: Option<String> =
            sqlx::query_scalar("SELECT data FROM site_document WHERE kind = $1")
                .bind(kind.as_str())
                .fetch_optional(&self.db.pool)
                .await?;

        match data {
            Some(data) => serde_json::from_str(&data).map_err(|e| {
                AppError::InternalServerError(format!(
                    "Corrupt {} settings: {}",
                    kind.as_str(),
                    e
                ))
            }),
            None => Ok(kind.default_document()),
        }
    }

    pub async fn replace(&self, kind: DocumentKind, value: &Value) -> AppResult<Value> {
        if !value.is_object() {
            return Err(AppError::Validation(format!(
                "{} settings must be a JSON object",
                kind.as_str()
            )));
        }

        let data = serde_json::to_string(value).map_err(|e| {
            AppError::InternalServerError(format!("Failed to encode settings: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO site_document (kind, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(kind) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
            "#,
        )
        .bind(kind.as_str())
        .bind(data)
        .bind(current_timestamp_seconds())
        .execute(&self.db.pool)
        .await?;

        self.get(kind).await
    }
}
