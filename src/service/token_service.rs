use crate::config::{logging, parameter};
use crate::dto::token_dto::{TokenClaimsDto, TokenReadDto};
use crate::error::token_error::TokenError;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use tracing::warn;
use uuid::Uuid;

const ISSUER: &str = "marketplace-auth";
const AUDIENCE: &str = "marketplace-api";

/// Signs and verifies the two token kinds. Access tokens are short-lived and
/// stateless; refresh tokens are signed with a separate secret and also
/// persisted server-side for revocation.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    access_ttl_minutes: i64,
    refresh_secret: String,
    refresh_ttl_days: i64,
}

pub trait TokenServiceTrait {
    fn from_parameters() -> Result<Self, TokenError>
    where
        Self: Sized;
    fn generate_access_token(&self, user_id: Uuid) -> Result<TokenReadDto, TokenError>;
    fn generate_refresh_token(&self, user_id: Uuid) -> Result<TokenReadDto, TokenError>;
    fn decode_access_token(
        &self,
        token: &str,
    ) -> jsonwebtoken::errors::Result<TokenData<TokenClaimsDto>>;
}

impl TokenServiceTrait for TokenService {
    fn from_parameters() -> Result<Self, TokenError> {
        Ok(Self {
            access_secret: resolve_secret("ACCESS_TOKEN_SECRET")?,
            access_ttl_minutes: parameter::get_i64("ACCESS_TOKEN_TTL_MINUTES"),
            refresh_secret: resolve_secret("REFRESH_TOKEN_SECRET")?,
            refresh_ttl_days: parameter::get_i64("REFRESH_TOKEN_TTL_DAYS"),
        })
    }

    fn generate_access_token(&self, user_id: Uuid) -> Result<TokenReadDto, TokenError> {
        self.sign(
            user_id,
            &self.access_secret,
            chrono::Duration::minutes(self.access_ttl_minutes),
        )
    }

    fn generate_refresh_token(&self, user_id: Uuid) -> Result<TokenReadDto, TokenError> {
        self.sign(
            user_id,
            &self.refresh_secret,
            chrono::Duration::days(self.refresh_ttl_days),
        )
    }

    fn decode_access_token(
        &self,
        token: &str,
    ) -> jsonwebtoken::errors::Result<TokenData<TokenClaimsDto>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 30;

        decode::<TokenClaimsDto>(
            token,
            &DecodingKey::from_secret(self.access_secret.as_ref()),
            &validation,
        )
    }
}

impl TokenService {
    fn sign(
        &self,
        user_id: Uuid,
        secret: &str,
        lifetime: chrono::Duration,
    ) -> Result<TokenReadDto, TokenError> {
        let iat = chrono::Utc::now().timestamp();
        let exp = chrono::Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| {
                TokenError::TokenCreationError("Token expiration calculation overflow".to_string())
            })?
            .timestamp();

        let claims = TokenClaimsDto {
            sub: user_id,
            iat,
            exp,
            jti: Uuid::now_v7().to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .map_err(|e| TokenError::TokenCreationError(e.to_string()))?;

        Ok(TokenReadDto { token, iat, exp })
    }
}

/// Signing secrets have no safe default. Production refuses to start without
/// one; development falls back to a fixed value behind a loud warning.
fn resolve_secret(name: &str) -> Result<String, TokenError> {
    match parameter::get_optional(name) {
        Some(secret) if secret.len() >= 32 => Ok(secret),
        Some(secret) => Err(TokenError::TokenCreationError(format!(
            "{} must be at least 32 bytes (256 bits), current length: {}",
            name,
            secret.len()
        ))),
        None => {
            if logging::get_config().is_production() {
                Err(TokenError::TokenCreationError(format!(
                    "{} is required in production",
                    name
                )))
            } else {
                warn!(
                    "SECURITY: {} is not set, using an insecure development-only value",
                    name
                );
                Ok(format!("{name}-insecure-development-secret-value"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService {
            access_secret: "access-secret-for-tests-0123456789ab".to_string(),
            access_ttl_minutes: 60,
            refresh_secret: "refresh-secret-for-tests-0123456789a".to_string(),
            refresh_ttl_days: 7,
        }
    }

    #[test]
    fn access_token_round_trips_subject() {
        let svc = service();
        let user_id = Uuid::now_v7();

        let issued = svc.generate_access_token(user_id).unwrap();
        let decoded = svc.decode_access_token(&issued.token).unwrap();

        assert_eq!(decoded.claims.sub, user_id);
        assert_eq!(decoded.claims.iss, ISSUER);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 60 * 60);
    }

    #[test]
    fn access_tokens_carry_unique_jti() {
        let svc = service();
        let user_id = Uuid::now_v7();

        let first = svc.generate_access_token(user_id).unwrap();
        let second = svc.generate_access_token(user_id).unwrap();
        assert_ne!(
            svc.decode_access_token(&first.token).unwrap().claims.jti,
            svc.decode_access_token(&second.token).unwrap().claims.jti
        );
    }

    #[test]
    fn refresh_token_is_not_a_valid_access_token() {
        // Separate secrets: a refresh token must never pass the access gate.
        let svc = service();
        let refresh = svc.generate_refresh_token(Uuid::now_v7()).unwrap();

        let result = svc.decode_access_token(&refresh.token);
        assert!(matches!(
            result.unwrap_err().kind(),
            jsonwebtoken::errors::ErrorKind::InvalidSignature
        ));
    }

    #[test]
    fn refresh_token_lifetime_is_days() {
        let svc = service();
        let issued = svc.generate_refresh_token(Uuid::now_v7()).unwrap();
        assert_eq!(issued.exp - issued.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn expired_access_token_reports_expiry() {
        let svc = TokenService {
            access_ttl_minutes: -5,
            ..service()
        };
        let issued = svc.generate_access_token(Uuid::now_v7()).unwrap();

        let result = svc.decode_access_token(&issued.token);
        assert!(matches!(
            result.unwrap_err().kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = service();
        let issued = svc.generate_access_token(Uuid::now_v7()).unwrap();
        let mut tampered = issued.token.clone();
        tampered.pop();

        assert!(svc.decode_access_token(&tampered).is_err());
    }
}
