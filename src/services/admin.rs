use crate::config::Config;
use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::AdminUser;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::time::current_timestamp_seconds;

pub struct AdminService<'a> {
    db: &'a Database,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a Database) -> Self {
        AdminService { db }
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password, created_at, updated_at
            FROM admin_user
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(result)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<AdminUser>> {
        let result = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password, created_at, updated_at
            FROM admin_user
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(result)
    }

    /// Store a new admin; `password` is the plaintext and is hashed here.
    pub async fn create(&self, username: &str, password: &str) -> AppResult<AdminUser> {
        let password_hash = hash_password(password)?;
        let now = current_timestamp_seconds();

        let result = sqlx::query(
            r#"
            INSERT INTO admin_user (username, password, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .execute(&self.db.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::InternalServerError("Failed to create admin".to_string()))
    }

    pub async fn update_password(&self, id: i64, new_password: &str) -> AppResult<()> {
        let password_hash = hash_password(new_password)?;

        let result = sqlx::query("UPDATE admin_user SET password = $1, updated_at = $2 WHERE id = $3")
            .bind(password_hash)
            .bind(current_timestamp_seconds())
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user")
            .fetch_one(&self.db.pool)
            .await?;

        Ok(count)
    }

    /// Returns the admin when the credentials match, `None` otherwise.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<AdminUser>> {
        let Some(admin) = self.get_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(password, &admin.password)? {
            Ok(Some(admin))
        } else {
            Ok(None)
        }
    }

    /// Create the first admin from `ADMIN_USERNAME`/`ADMIN_PASSWORD` when the
    /// table is empty.
    pub async fn ensure_seeded(&self, config: &Config) -> AppResult<()> {
        if self.count().await? > 0 {
            return Ok(());
        }

        match config.admin_password.as_deref() {
            Some(password) => {
                let admin = self.create(&config.admin_username, password).await?;
                tracing::info!("Seeded admin account '{}'", admin.username);
            }
            None => {
                tracing::warn!("No admin account exists and ADMIN_PASSWORD is not set; login is disabled");
            }
        }

        Ok(())
    }
}
