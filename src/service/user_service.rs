use crate::config::database::Database;
use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::dto::user_dto::RegisterDto;
use crate::entity::user::User;
use crate::error::db_error::DbError;
use crate::error::user_error::UserError;
use crate::error::ApiError;
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use crate::service::mailer::Mailer;
use crate::service::session_service::SessionService;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    mailer: Arc<dyn Mailer>,
}

impl UserService {
    pub fn new(db_conn: &Arc<Database>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            user_repo: UserRepository::new(db_conn),
            mailer,
        }
    }

    /// Creates the account and fires the verification email. The email
    /// existence pre-check is an optimization; the unique constraint is what
    /// actually decides races, surfaced here as `EmailTaken`.
    pub async fn register(&self, payload: RegisterDto) -> Result<User, ApiError> {
        match self.user_repo.email_exists(&payload.email).await {
            Ok(true) => return Err(UserError::EmailTaken)?,
            Ok(false) => {}
            Err(e) => {
                secure_log::secure_error!("Failed to check email existence", e);
                return Err(DbError::SomethingWentWrong(e.to_string()))?;
            }
        }

        let user_id = Uuid::now_v7();
        let password_digest = self.hash_password(&payload.password)?;

        let verification_token = SessionService::generate_opaque_token();
        let verification_token_hash = SessionService::digest_opaque_token(&verification_token);

        let insert_result = self
            .user_repo
            .insert(
                user_id,
                &payload.email,
                &password_digest,
                payload.role,
                &verification_token_hash,
            )
            .await;

        if let Err(e) = insert_result {
            if is_unique_violation(&e) {
                // Lost the race to a concurrent registration.
                return Err(UserError::EmailTaken)?;
            }
            secure_log::secure_error!("Failed to insert user", e);
            return Err(DbError::SomethingWentWrong(e.to_string()))?;
        }

        let user = self.user_repo.find(user_id).await.map_err(|e| {
            secure_log::secure_error!("Failed to find user after insertion", e);
            DbError::SomethingWentWrong(e.to_string())
        })?;

        info!("SECURITY: User registered with ID: {}", user.id);

        // Best-effort: a failed notification never fails the registration.
        if let Err(e) = self.mailer.send(
            &user.email,
            "verify-email",
            serde_json::json!({ "token": verification_token }),
        ) {
            warn!("Failed to send verification email: {}", e);
        }

        Ok(user)
    }

    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool, ApiError> {
        match bcrypt::verify(password, &user.password) {
            Ok(is_valid) => {
                if !is_valid {
                    warn!("SECURITY: Invalid password attempt for user ID: {}", user.id);
                }
                Ok(is_valid)
            }
            Err(e) => {
                secure_log::secure_error!("SECURITY: Password verification system error", e);
                // A malformed digest reads as a failed match, never as a hint
                // that the account exists.
                Ok(false)
            }
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        let bcrypt_cost = parameter::get_u64("BCRYPT_COST") as u32;
        bcrypt::hash(password, bcrypt_cost).map_err(|e| {
            secure_log::secure_error!("Failed to hash password", e);
            ApiError::Db(DbError::SomethingWentWrong(
                "Password hashing failed".to_string(),
            ))
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, ApiError> {
        self.user_repo.find(id).await.map_err(|e| {
            if let sqlx::Error::RowNotFound = e {
                ApiError::User(UserError::UserNotFound)
            } else {
                secure_log::secure_error!("Failed to find user by ID", e);
                ApiError::Db(DbError::SomethingWentWrong(e.to_string()))
            }
        })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn digest_round_trips_for_any_password() {
        for password in ["secret", "a much longer pass phrase", "пароль123"] {
            let digest = bcrypt::hash(password, TEST_COST).unwrap();
            assert!(bcrypt::verify(password, &digest).unwrap());
            assert!(!bcrypt::verify("wrong", &digest).unwrap());
        }
    }

    #[test]
    fn digest_uses_fresh_salt_per_call() {
        let first = bcrypt::hash("secret1", TEST_COST).unwrap();
        let second = bcrypt::hash("secret1", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(bcrypt::verify("secret1", &first).unwrap());
        assert!(bcrypt::verify("secret1", &second).unwrap());
    }

    #[test]
    fn malformed_digest_reads_as_mismatch() {
        // bcrypt::verify errors on garbage digests; the service treats that
        // as a failed match.
        assert!(bcrypt::verify("secret1", "not-a-bcrypt-digest").is_err());
    }
}
