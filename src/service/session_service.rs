use crate::config::database::Database;
use crate::config::logging::secure_log;
use crate::entity::user::User;
use crate::error::{db_error::DbError, token_error::TokenError, ApiError};
use crate::repository::refresh_token_repository::{
    RefreshTokenRepository, RefreshTokenRepositoryTrait,
};
use crate::service::token_service::{TokenService, TokenServiceTrait};
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;

/// The token pair handed back by register and login.
#[derive(Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues token pairs and persists the refresh half so it can be revoked.
#[derive(Clone)]
pub struct SessionService {
    token_service: TokenService,
    refresh_token_repo: RefreshTokenRepository,
}

pub trait SessionServiceTrait {
    fn new(db_conn: &Arc<Database>, token_service: TokenService) -> Self;
    async fn open_session(&self, user: &User) -> Result<SessionTokens, ApiError>;
}

impl SessionServiceTrait for SessionService {
    fn new(db_conn: &Arc<Database>, token_service: TokenService) -> Self {
        Self {
            token_service,
            refresh_token_repo: RefreshTokenRepository::new(db_conn),
        }
    }

    async fn open_session(&self, user: &User) -> Result<SessionTokens, ApiError> {
        let access = self.token_service.generate_access_token(user.id)?;
        let refresh = self.token_service.generate_refresh_token(user.id)?;

        let expires_at = DateTime::<Utc>::from_timestamp(refresh.exp, 0).ok_or_else(|| {
            TokenError::TokenCreationError("Refresh expiry out of range".to_string())
        })?;

        self.refresh_token_repo
            .insert(&refresh.token, user.id, expires_at)
            .await
            .map_err(|e| {
                secure_log::secure_error!("Failed to persist refresh token", e);
                DbError::SomethingWentWrong(e.to_string())
            })?;

        info!("SECURITY: Session opened for user ID: {}", user.id);

        Ok(SessionTokens {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }
}

impl SessionService {
    /// Opaque single-purpose secret (email verification, password reset):
    /// 32 random bytes, URL-safe base64.
    pub fn generate_opaque_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);

        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Opaque tokens are stored only as SHA-256 hex digests; the raw value
    /// exists nowhere but the notification email.
    pub fn digest_opaque_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let result = hasher.finalize();

        let mut hex_string = String::with_capacity(64);
        for byte in result {
            use std::fmt::Write;
            write!(hex_string, "{:02x}", byte).unwrap();
        }
        hex_string
    }

    /// Password-reset tokens stay valid for one hour.
    pub fn reset_token_expiration() -> DateTime<Utc> {
        Utc::now() + chrono::Duration::hours(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn opaque_tokens_are_unique() {
        let first = SessionService::generate_opaque_token();
        let second = SessionService::generate_opaque_token();

        assert_ne!(first, second);
        // 32 bytes, unpadded URL-safe base64
        assert_eq!(first.len(), 43);
        assert_eq!(second.len(), 43);
    }

    #[test]
    fn opaque_token_digest_is_stable() {
        let token = "test_opaque_token";
        let first = SessionService::digest_opaque_token(token);
        let second = SessionService::digest_opaque_token(token);

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, SessionService::digest_opaque_token("another_token"));
    }

    #[test]
    fn digest_differs_from_raw_token() {
        let raw = SessionService::generate_opaque_token();
        assert_ne!(raw, SessionService::digest_opaque_token(&raw));
    }

    #[test]
    fn reset_token_expires_in_one_hour() {
        let expiration = SessionService::reset_token_expiration();
        let expected = Utc::now() + Duration::hours(1);
        let diff = (expiration - expected).num_seconds().abs();
        assert!(diff < 10);
    }
}
