use crate::entity::user::Role;
use crate::error::{authorization_error::AuthorizationError, ApiError};
use crate::middleware::auth::CurrentUser;
use axum::extract::State;
use axum::{http::Request, middleware::Next, response::IntoResponse};
use std::sync::Arc;
use tracing::warn;

/// Role allow-list carried as middleware state. Must be layered inside the
/// auth gate so `CurrentUser` is already attached.
#[derive(Clone)]
pub struct RequiredRoles(Arc<Vec<Role>>);

impl RequiredRoles {
    pub fn new(allowed: Vec<Role>) -> Self {
        Self(Arc::new(allowed))
    }

    pub fn any_member() -> Self {
        Self::new(vec![Role::Freelancer, Role::Client])
    }
}

pub async fn require_role(
    State(allowed): State<RequiredRoles>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let current_user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AuthorizationError::ContextMissing)?;

    if !role_allowed(current_user.role, &allowed.0) {
        warn!(
            "SECURITY: Role {} denied for user ID: {}",
            current_user.role, current_user.id
        );
        return Err(AuthorizationError::RoleNotAllowed)?;
    }

    Ok(next.run(req).await)
}

fn role_allowed(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_must_be_in_allow_list() {
        assert!(role_allowed(Role::Client, &[Role::Client]));
        assert!(!role_allowed(Role::Freelancer, &[Role::Client]));
        assert!(!role_allowed(Role::Client, &[]));
    }

    #[test]
    fn any_member_covers_both_roles() {
        let roles = RequiredRoles::any_member();
        assert!(role_allowed(Role::Freelancer, &roles.0));
        assert!(role_allowed(Role::Client, &roles.0));
    }
}
