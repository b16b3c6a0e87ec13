use serde_json::Value;

use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::site_config::{validate_setting, SiteConfig};
use crate::utils::time::current_timestamp_seconds;

pub struct SiteConfigService<'a> {
    db: &'a Database,
}

impl<'a> SiteConfigService<'a> {
    pub fn new(db: &'a Database) -> Self {
        SiteConfigService { db }
    }

    pub async fn get_all(&self) -> AppResult<Vec<SiteConfig>> {
        let entries = sqlx::query_as::<_, SiteConfig>(
            "SELECT id, config_key, value, updated_at FROM site_config ORDER BY config_key ASC",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(entries)
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<SiteConfig>> {
        let entry = sqlx::query_as::<_, SiteConfig>(
            "SELECT id, config_key, value, updated_at FROM site_config WHERE config_key = $1",
        )
        .bind(key)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(entry)
    }

    /// Value stored under `key`, if any.
    pub async fn get_value(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.get(key).await?.map(|entry| entry.value))
    }

    /// Insert or replace the value under `key`. Known keys must match their shape.
    pub async fn upsert(&self, key: &str, value: &Value) -> AppResult<SiteConfig> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Validation("key must not be empty".to_string()));
        }
        validate_setting(key, value)?;

        let value_json = serde_json::to_string(value)
            .map_err(|e| AppError::InternalServerError(format!("Failed to encode config: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO site_config (config_key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(config_key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value_json)
        .bind(current_timestamp_seconds())
        .execute(&self.db.pool)
        .await?;

        self.get(key)
            .await?
            .ok_or_else(|| AppError::InternalServerError("Failed to save config".to_string()))
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM site_config WHERE config_key = $1")
            .bind(key)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Config '{}' not found", key)));
        }

        Ok(())
    }
}
