pub mod auth_handler;
pub mod health_handler;
pub mod password_handler;
pub mod profile_handler;
pub mod refresh_handler;
pub mod register_handler;
