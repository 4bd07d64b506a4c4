pub mod auth_state;
pub mod token_state;
