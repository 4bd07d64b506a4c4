use crate::config::logging::secure_log;
use crate::dto::token_dto::AuthResponseDto;
use crate::dto::user_dto::{LoginDto, UserReadDto};
use crate::entity::user::UserStatus;
use crate::error::{
    db_error::DbError, request_error::ValidatedRequest, user_error::UserError, ApiError,
};
use crate::repository::user_repository::UserRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::session_service::SessionServiceTrait;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use tracing::{info, warn};

pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<LoginDto>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    info!("Login attempt for email: {}", payload.email);

    let user = state
        .user_repo
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            secure_log::secure_error!("User lookup by email failed", e);
            DbError::SomethingWentWrong(e.to_string())
        })?;

    // Unknown email and wrong password collapse into one response so the
    // endpoint cannot be used to enumerate accounts.
    let user = match user {
        Some(user) => user,
        None => {
            warn!("Login failed - no matching account");
            return Err(UserError::InvalidCredentials)?;
        }
    };

    if !state.user_service.verify_password(&user, &payload.password)? {
        return Err(UserError::InvalidCredentials)?;
    }

    // Status is only consulted once the caller has proven the password.
    match user.status {
        UserStatus::Suspended => {
            warn!("SECURITY: Login refused for suspended user ID: {}", user.id);
            return Err(UserError::AccountSuspended)?;
        }
        UserStatus::Inactive => {
            warn!("SECURITY: Login refused for inactive user ID: {}", user.id);
            return Err(UserError::AccountInactive)?;
        }
        UserStatus::PendingVerification | UserStatus::Active => {}
    }

    let tokens = state.session_service.open_session(&user).await?;
    info!("Login successful for user ID: {}", user.id);

    Ok(SuccessResponse::send(AuthResponseDto {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: UserReadDto::from(user),
    }))
}
