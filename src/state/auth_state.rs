use crate::config::database::Database;
use crate::repository::refresh_token_repository::{
    RefreshTokenRepository, RefreshTokenRepositoryTrait,
};
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};
use crate::service::mailer::Mailer;
use crate::service::session_service::{SessionService, SessionServiceTrait};
use crate::service::token_service::TokenService;
use crate::service::user_service::UserService;
use std::sync::Arc;

/// Collaborators for the /auth routes, built once at router construction.
#[derive(Clone)]
pub struct AuthState {
    pub(crate) user_service: UserService,
    pub(crate) user_repo: UserRepository,
    pub(crate) refresh_token_repo: RefreshTokenRepository,
    pub(crate) token_service: TokenService,
    pub(crate) session_service: SessionService,
    pub(crate) mailer: Arc<dyn Mailer>,
}

impl AuthState {
    pub fn new(
        db_conn: &Arc<Database>,
        token_service: TokenService,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            user_service: UserService::new(db_conn, Arc::clone(&mailer)),
            user_repo: UserRepository::new(db_conn),
            refresh_token_repo: RefreshTokenRepository::new(db_conn),
            session_service: SessionService::new(db_conn, token_service.clone()),
            token_service,
            mailer,
        }
    }
}
