use crate::config::logging::secure_log;
use crate::dto::token_dto::MessageResponseDto;
use crate::dto::user_dto::{ForgotPasswordDto, ResetPasswordDto};
use crate::error::{
    db_error::DbError, request_error::ValidatedRequest, token_error::TokenError,
    user_error::UserError, ApiError,
};
use crate::repository::user_repository::UserRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::session_service::SessionService;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use chrono::Utc;
use tracing::{info, warn};

/// Issues a one-hour reset token and mails it. Only the token's digest is
/// persisted; the raw value exists nowhere but the email.
pub async fn forgot_password(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<ForgotPasswordDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let user = state
        .user_repo
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            secure_log::secure_error!("User lookup by email failed", e);
            DbError::SomethingWentWrong(e.to_string())
        })?
        .ok_or(UserError::UserNotFound)?;

    let reset_token = SessionService::generate_opaque_token();
    let reset_token_hash = SessionService::digest_opaque_token(&reset_token);
    let expires_at = SessionService::reset_token_expiration();

    state
        .user_repo
        .store_reset_token(user.id, &reset_token_hash, expires_at)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to store reset token", e);
            DbError::SomethingWentWrong(e.to_string())
        })?;

    info!("SECURITY: Password reset requested for user ID: {}", user.id);

    // Best-effort: delivery failure never fails the request.
    if let Err(e) = state.mailer.send(
        &user.email,
        "reset-password",
        serde_json::json!({ "token": reset_token }),
    ) {
        warn!("Failed to send password reset email: {}", e);
    }

    Ok(SuccessResponse::send(MessageResponseDto {
        message: "Password reset instructions sent".to_string(),
    }))
}

/// Consumes a reset token and stores the new credential digest. The token
/// columns are cleared in the same statement as the password update.
pub async fn reset_password(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<ResetPasswordDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let token_hash = SessionService::digest_opaque_token(&payload.token);

    let user = state
        .user_repo
        .find_by_reset_token_hash(&token_hash)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Reset token lookup failed", e);
            DbError::SomethingWentWrong(e.to_string())
        })?
        .ok_or(TokenError::InvalidResetToken)?;

    let live = user
        .password_reset_expires_at
        .map(|expires_at| expires_at > Utc::now())
        .unwrap_or(false);
    if !live {
        secure_log::secure_error!(
            "SECURITY: Expired reset token presented for user ID: {}",
            user.id
        );
        return Err(TokenError::InvalidResetToken)?;
    }

    let password_digest = state.user_service.hash_password(&payload.password)?;
    state
        .user_repo
        .update_password(user.id, &password_digest)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to update password", e);
            DbError::SomethingWentWrong(e.to_string())
        })?;

    info!("SECURITY: Password reset completed for user ID: {}", user.id);

    Ok(SuccessResponse::send(MessageResponseDto {
        message: "Password updated successfully".to_string(),
    }))
}
