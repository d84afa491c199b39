use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::password::hash_password;

/// The single administrator identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl AdminUser {
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<AdminUser>> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admin_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(db: &PgPool, username: &str, password_hash: &str) -> anyhow::Result<AdminUser> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Provision the configured admin on startup. Idempotent: an existing
    /// row wins and the password is not re-hashed.
    pub async fn ensure_seed(db: &PgPool, username: &str, password: &str) -> anyhow::Result<()> {
        if Self::find_by_username(db, username).await?.is_some() {
            return Ok(());
        }
        let hash = hash_password(password)?;
        let user = Self::create(db, username, &hash).await?;
        info!(admin_id = user.id, username = %user.username, "seeded admin user");
        Ok(())
    }
}
