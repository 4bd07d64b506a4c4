use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("{0}")]
    SomethingWentWrong(String),
}

impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        DbError::SomethingWentWrong(error.to_string())
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        // Detail stays in the server logs; clients get a generic message.
        ErrorResponse::send("Database error".to_string())
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_not_surfaced() {
        let error = DbError::SomethingWentWrong("connection reset by peer".to_string());
        assert_eq!(error.to_string(), "connection reset by peer");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
