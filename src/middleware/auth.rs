use crate::config::logging::secure_log;
use crate::entity::user::{Role, UserStatus};
use crate::error::{
    authorization_error::AuthorizationError, db_error::DbError, token_error::TokenError, ApiError,
};
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::{http, http::Request, middleware::Next, response::IntoResponse};
use jsonwebtoken::errors::ErrorKind;
use tracing::info;
use uuid::Uuid;

/// Verified identity attached to the request once the gate has passed.
/// Role and status come from the store on every request, never from claims.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Authorization gate: validates the bearer access token, re-fetches the
/// user, and requires an ACTIVE account before any handler runs.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(req.headers())?;

    let token_data = match state.token_service.decode_access_token(token) {
        Ok(token_data) => token_data,
        Err(err) => {
            return match err.kind() {
                ErrorKind::ExpiredSignature => {
                    secure_log::secure_error!("Expired access token presented");
                    Err(TokenError::TokenExpired)?
                }
                _ => {
                    secure_log::secure_error!("Invalid access token presented");
                    Err(TokenError::InvalidToken)?
                }
            };
        }
    };

    let user = match state.user_repo.find(token_data.claims.sub).await {
        Ok(user) => user,
        Err(sqlx::Error::RowNotFound) => {
            secure_log::secure_error!(
                "Access token subject no longer exists: {}",
                token_data.claims.sub
            );
            return Err(AuthorizationError::UserMissing)?;
        }
        Err(e) => {
            secure_log::secure_error!("User lookup failed during authentication", e);
            return Err(DbError::SomethingWentWrong(e.to_string()))?;
        }
    };

    if user.status != UserStatus::Active {
        secure_log::secure_error!(
            "SECURITY: Rejected token for non-active account, user ID: {} status: {}",
            user.id,
            user.status
        );
        return Err(AuthorizationError::AccountNotActive)?;
    }

    info!("SECURITY: Authentication successful for user ID: {}", user.id);
    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &http::HeaderMap) -> Result<&str, TokenError> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(TokenError::MissingToken)?;

    if token.is_empty() {
        return Err(TokenError::InvalidToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn missing_header_is_missing_token() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(TokenError::MissingToken)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_missing_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(matches!(
            bearer_token(&headers),
            Err(TokenError::MissingToken)
        ));
    }

    #[test]
    fn empty_bearer_value_is_invalid_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer "),
        );
        assert!(matches!(
            bearer_token(&headers),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn well_formed_header_yields_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
