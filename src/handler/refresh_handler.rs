use crate::config::logging::secure_log;
use crate::dto::token_dto::{
    LogoutRequestDto, MessageResponseDto, RefreshResponseDto, RefreshTokenRequestDto,
};
use crate::dto::user_dto::UserReadDto;
use crate::error::{
    db_error::DbError, request_error::ValidatedRequest, token_error::TokenError, ApiError,
};
use crate::repository::refresh_token_repository::RefreshTokenRepositoryTrait;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::token_service::TokenServiceTrait;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use chrono::Utc;
use tracing::info;

/// Exchanges a live refresh token for a new access token. The refresh token
/// itself is neither rotated nor extended; once it is gone the caller must
/// log in again.
pub async fn refresh_token(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RefreshTokenRequestDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let row = state
        .refresh_token_repo
        .find(&payload.refresh_token)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Refresh token lookup failed", e);
            DbError::SomethingWentWrong(e.to_string())
        })?
        .ok_or_else(|| {
            secure_log::secure_error!("Refresh token not found");
            TokenError::InvalidRefreshToken
        })?;

    if row.is_expired(Utc::now()) {
        // Delete before failing: the next attempt with the same token must
        // report "invalid", not "expired".
        state
            .refresh_token_repo
            .delete(&payload.refresh_token)
            .await
            .map_err(|e| {
                secure_log::secure_error!("Failed to delete expired refresh token", e);
                DbError::SomethingWentWrong(e.to_string())
            })?;
        secure_log::secure_error!("SECURITY: Expired refresh token for user ID: {}", row.user_id);
        return Err(TokenError::RefreshTokenExpired)?;
    }

    let user = match state.user_repo.find(row.user_id).await {
        Ok(user) => user,
        Err(sqlx::Error::RowNotFound) => {
            secure_log::secure_error!("Refresh token owner no longer exists");
            return Err(TokenError::InvalidRefreshToken)?;
        }
        Err(e) => {
            secure_log::secure_error!("Refresh token owner lookup failed", e);
            return Err(DbError::SomethingWentWrong(e.to_string()))?;
        }
    };

    let access = state.token_service.generate_access_token(user.id)?;
    info!("SECURITY: Access token refreshed for user ID: {}", user.id);

    Ok(SuccessResponse::send(RefreshResponseDto {
        access_token: access.token,
        user: UserReadDto::from(user),
    }))
}

/// Revokes the presented refresh token. Logout is idempotent: deleting
/// nothing is still success, so no lookup happens first.
pub async fn logout(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LogoutRequestDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let removed = state
        .refresh_token_repo
        .delete(&payload.refresh_token)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to delete refresh token on logout", e);
            DbError::SomethingWentWrong(e.to_string())
        })?;

    if removed > 0 {
        info!("SECURITY: Refresh token revoked on logout");
    }

    Ok(SuccessResponse::send(MessageResponseDto {
        message: "Logged out successfully".to_string(),
    }))
}
