use crate::handler::{auth_handler, password_handler, refresh_handler, register_handler};
use crate::state::auth_state::AuthState;
use axum::{routing::post, Router};

pub fn routes() -> Router<AuthState> {
    Router::<AuthState>::new()
        .route("/auth/register", post(register_handler::register))
        .route("/auth/login", post(auth_handler::login))
        .route("/auth/refresh-token", post(refresh_handler::refresh_token))
        .route("/auth/logout", post(refresh_handler::logout))
        .route("/auth/forgot-password", post(password_handler::forgot_password))
        .route("/auth/reset-password", post(password_handler::reset_password))
        .route("/auth/verify-email", post(register_handler::verify_email))
}
