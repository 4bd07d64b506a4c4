use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Email already in use")]
    EmailTaken,
    // One message for both unknown-email and wrong-password so the response
    // never reveals which part failed.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account suspended")]
    AccountSuspended,
    #[error("Account inactive")]
    AccountInactive,
    #[error("User not found")]
    UserNotFound,
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status_code = match self {
            UserError::EmailTaken => StatusCode::CONFLICT,
            UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserError::AccountSuspended => StatusCode::UNAUTHORIZED,
            UserError::AccountInactive => StatusCode::UNAUTHORIZED,
            UserError::UserNotFound => StatusCode::NOT_FOUND,
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
            UserError::EmailTaken.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            UserError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserError::AccountSuspended.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserError::AccountInactive.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UserError::UserNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn credential_failures_share_one_message() {
        assert_eq!(UserError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
