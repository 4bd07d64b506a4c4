use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Detailed validation error information
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub r#type: String,
    pub details: String,
}

impl ValidationErrorDetail {
    pub fn new(field: String, r#type: String, details: String) -> Self {
        Self {
            field,
            r#type,
            details,
        }
    }
}

/// Success envelope: `{"status":"success", ...payload fields}`.
/// The payload is flattened so response bodies read exactly as the API
/// documents them (`accessToken`, `refreshToken`, `user`, `message`).
#[derive(Clone, Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub data: T,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl<T> SuccessResponse<T> {
    /// Create a success response with default 200 OK status
    pub fn send(data: T) -> Self {
        Self {
            status: "success",
            data,
            status_code: StatusCode::OK,
        }
    }

    /// Set custom status code (builder pattern)
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }
}

impl<T> IntoResponse for SuccessResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Error envelope: `{"status":"error", "message": ...}` plus optional
/// per-field validation details. Serialization is deterministic so equal
/// errors produce byte-identical bodies.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationErrorDetail>>,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl ErrorResponse {
    /// Create an error response with default 400 Bad Request status
    pub fn send(message: String) -> Self {
        Self {
            status: "error",
            message,
            errors: None,
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Create an error response with validation errors
    pub fn with_validation_errors(message: String, errors: Vec<ValidationErrorDetail>) -> Self {
        Self {
            status: "error",
            message,
            errors: Some(errors),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Set custom status code (builder pattern)
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        message: String,
    }

    #[test]
    fn success_envelope_flattens_payload() {
        let response = SuccessResponse::send(Payload {
            message: "Logged out successfully".to_string(),
        });

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Logged out successfully");
    }

    #[test]
    fn error_envelope_is_deterministic() {
        let first = serde_json::to_string(&ErrorResponse::send("Invalid credentials".to_string()))
            .unwrap();
        let second = serde_json::to_string(&ErrorResponse::send("Invalid credentials".to_string()))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first, r#"{"status":"error","message":"Invalid credentials"}"#);
    }

    #[test]
    fn validation_details_serialize_under_errors() {
        let response = ErrorResponse::with_validation_errors(
            "Validation failed".to_string(),
            vec![ValidationErrorDetail::new(
                "password".to_string(),
                "length".to_string(),
                "Password must be at least 6 characters".to_string(),
            )],
        );

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["errors"][0]["field"], "password");
    }
}
