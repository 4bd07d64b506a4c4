use crate::response::app_response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures raised by the authorization gate and the role check after the
/// bearer token itself has been accepted.
#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Not authorized, user not found")]
    UserMissing,
    #[error("Not authorized, account is not active")]
    AccountNotActive,
    #[error("Access denied")]
    RoleNotAllowed,
    // Router mis-wiring: require_role mounted without the auth gate upstream.
    #[error("Authentication context missing")]
    ContextMissing,
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AuthorizationError::UserMissing => StatusCode::UNAUTHORIZED,
            AuthorizationError::AccountNotActive => StatusCode::UNAUTHORIZED,
            AuthorizationError::RoleNotAllowed => StatusCode::FORBIDDEN,
            AuthorizationError::ContextMissing => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            AuthorizationError::UserMissing.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthorizationError::AccountNotActive.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthorizationError::RoleNotAllowed.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthorizationError::ContextMissing.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
