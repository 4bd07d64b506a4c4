use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Not authorized, no token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("Refresh token expired")]
    RefreshTokenExpired,
    #[error("Invalid or expired reset token")]
    InvalidResetToken,
    #[error("Invalid verification token")]
    InvalidVerificationToken,
    #[error("Token error: {0}")]
    TokenCreationError(String),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let status_code = match self {
            TokenError::MissingToken => StatusCode::UNAUTHORIZED,
            TokenError::InvalidToken => StatusCode::UNAUTHORIZED,
            TokenError::TokenExpired => StatusCode::UNAUTHORIZED,
            TokenError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            TokenError::RefreshTokenExpired => StatusCode::UNAUTHORIZED,
            TokenError::InvalidResetToken => StatusCode::UNAUTHORIZED,
            TokenError::InvalidVerificationToken => StatusCode::UNAUTHORIZED,
            TokenError::TokenCreationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
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
    fn bearer_failures_are_unauthorized() {
        for error in [
            TokenError::MissingToken,
            TokenError::InvalidToken,
            TokenError::TokenExpired,
            TokenError::InvalidRefreshToken,
            TokenError::RefreshTokenExpired,
        ] {
            assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn creation_failure_is_internal() {
        let response = TokenError::TokenCreationError("overflow".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn gate_messages_are_distinct() {
        let messages = [
            TokenError::MissingToken.to_string(),
            TokenError::InvalidToken.to_string(),
            TokenError::TokenExpired.to_string(),
        ];
        assert_eq!(messages[0], "Not authorized, no token");
        assert_eq!(messages[1], "Invalid token");
        assert_eq!(messages[2], "Token expired");
    }
}
