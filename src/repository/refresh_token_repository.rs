use crate::config::database::{Database, DatabaseTrait};
use crate::entity::refresh_token::RefreshToken;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct RefreshTokenRepository {
    db_conn: Arc<Database>,
}

#[async_trait]
pub trait RefreshTokenRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), Error>;
    /// Exact-value lookup; expired rows are still returned so the caller can
    /// delete them and report expiry distinctly from absence.
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, Error>;
    /// Delete-many by value. Returns the number of rows removed; zero is not
    /// an error (logout is idempotent).
    async fn delete(&self, token: &str) -> Result<u64, Error>;
}

#[async_trait]
impl RefreshTokenRepositoryTrait for RefreshTokenRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO refresh_tokens (token, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(self.db_conn.get_pool())
        .await?;

        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, Error> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT token, user_id, expires_at, created_at FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }

    async fn delete(&self, token: &str) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(self.db_conn.get_pool())
            .await?;

        Ok(result.rows_affected())
    }
}
