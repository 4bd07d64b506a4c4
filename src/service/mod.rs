pub mod mailer;
pub mod session_service;
pub mod token_service;
pub mod user_service;
