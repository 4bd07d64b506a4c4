use crate::config::database::{Database, DatabaseTrait};
use crate::entity::user::{Role, User, UserStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db_conn: Arc<Database>,
}

/// Everything the credential flows need from the user store. The unique
/// email constraint lives in the database; `insert` surfaces its violation
/// untranslated so the service layer can map it to a conflict.
#[async_trait]
pub trait UserRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find(&self, id: Uuid) -> Result<User, Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;
    async fn email_exists(&self, email: &str) -> Result<bool, Error>;
    async fn insert(
        &self,
        id: Uuid,
        email: &str,
        password_digest: &str,
        role: Role,
        verification_token_hash: &str,
    ) -> Result<(), Error>;
    async fn store_reset_token(
        &self,
        user_id: Uuid,
        reset_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), Error>;
    async fn find_by_reset_token_hash(&self, reset_token_hash: &str)
        -> Result<Option<User>, Error>;
    async fn update_password(&self, user_id: Uuid, password_digest: &str) -> Result<(), Error>;
    async fn find_by_verification_token_hash(
        &self,
        verification_token_hash: &str,
    ) -> Result<Option<User>, Error>;
    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), Error>;
}

const USER_COLUMNS: &str = "id, email, password, role, status, email_verified, \
     verification_token_hash, password_reset_token_hash, password_reset_expires_at, \
     created_at, updated_at";

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find(&self, id: Uuid) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn insert(
        &self,
        id: Uuid,
        email: &str,
        password_digest: &str,
        role: Role,
        verification_token_hash: &str,
    ) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO users (id, email, password, role, status, email_verified, verification_token_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(email)
        .bind(password_digest)
        .bind(role)
        .bind(UserStatus::PendingVerification)
        .bind(false)
        .bind(verification_token_hash)
        .execute(self.db_conn.get_pool())
        .await?;

        Ok(())
    }

    async fn store_reset_token(
        &self,
        user_id: Uuid,
        reset_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query(
            "UPDATE users SET password_reset_token_hash = $1, password_reset_expires_at = $2, \
             updated_at = NOW() WHERE id = $3",
        )
        .bind(reset_token_hash)
        .bind(expires_at)
        .bind(user_id)
        .execute(self.db_conn.get_pool())
        .await?;

        Ok(())
    }

    async fn find_by_reset_token_hash(
        &self,
        reset_token_hash: &str,
    ) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE password_reset_token_hash = $1"
        ))
        .bind(reset_token_hash)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }

    async fn update_password(&self, user_id: Uuid, password_digest: &str) -> Result<(), Error> {
        sqlx::query(
            "UPDATE users SET password = $1, password_reset_token_hash = NULL, \
             password_reset_expires_at = NULL, updated_at = NOW() WHERE id = $2",
        )
        .bind(password_digest)
        .bind(user_id)
        .execute(self.db_conn.get_pool())
        .await?;

        Ok(())
    }

    async fn find_by_verification_token_hash(
        &self,
        verification_token_hash: &str,
    ) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE verification_token_hash = $1"
        ))
        .bind(verification_token_hash)
        .fetch_optional(self.db_conn.get_pool())
        .await
    }

    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), Error> {
        // Verification activates pending accounts; admin-set states are
        // left untouched.
        sqlx::query(
            "UPDATE users SET email_verified = TRUE, verification_token_hash = NULL, \
             status = CASE WHEN status = 'PENDING_VERIFICATION' THEN 'ACTIVE'::user_status ELSE status END, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .execute(self.db_conn.get_pool())
        .await?;

        Ok(())
    }
}
