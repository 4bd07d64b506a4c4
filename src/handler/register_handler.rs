use crate::config::logging::secure_log;
use crate::dto::token_dto::{AuthResponseDto, MessageResponseDto};
use crate::dto::user_dto::{RegisterDto, UserReadDto, VerifyEmailDto};
use crate::error::{
    db_error::DbError, request_error::ValidatedRequest, token_error::TokenError, ApiError,
};
use crate::repository::user_repository::UserRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::session_service::{SessionService, SessionServiceTrait};
use crate::state::auth_state::AuthState;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

/// Registration also logs the new user in: the response carries a full
/// token pair alongside the created account.
pub async fn register(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RegisterDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    secure_log::sensitive_debug!("Registration attempt for email: {}", payload.email);

    let user = state.user_service.register(payload).await?;
    let tokens = state.session_service.open_session(&user).await?;

    Ok(SuccessResponse::send(AuthResponseDto {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: UserReadDto::from(user),
    })
    .with_status(StatusCode::CREATED))
}

/// Completes registration: flips the account to ACTIVE and consumes the
/// verification token.
pub async fn verify_email(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<VerifyEmailDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let token_hash = SessionService::digest_opaque_token(&payload.token);

    let user = state
        .user_repo
        .find_by_verification_token_hash(&token_hash)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Verification token lookup failed", e);
            DbError::SomethingWentWrong(e.to_string())
        })?
        .ok_or(TokenError::InvalidVerificationToken)?;

    state
        .user_repo
        .mark_email_verified(user.id)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to mark email verified", e);
            DbError::SomethingWentWrong(e.to_string())
        })?;

    info!("SECURITY: Email verified for user ID: {}", user.id);

    Ok(SuccessResponse::send(MessageResponseDto {
        message: "Email verified successfully".to_string(),
    }))
}
