use crate::config::logging::secure_log;
use crate::dto::user_dto::UserReadDto;
use crate::middleware::auth::CurrentUser;
use crate::response::app_response::SuccessResponse;
use axum::Extension;
use serde::Serialize;

#[derive(Clone, Serialize)]
pub struct ProfileResponseDto {
    pub user: UserReadDto,
}

/// The identity the gate verified for this request.
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
) -> SuccessResponse<ProfileResponseDto> {
    secure_log::sensitive_debug!("Profile accessed for email: {}", current_user.email);

    SuccessResponse::send(ProfileResponseDto {
        user: UserReadDto {
            id: current_user.id,
            email: current_user.email,
            role: current_user.role,
        },
    })
}
