use crate::entity::user::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDto {
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub password: String,
    // Closed set; unknown values are rejected during deserialization.
    pub role: Role,
}

// Login deliberately validates presence only: a malformed email must fall
// through to the same "Invalid credentials" response as an unknown one.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginDto {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordDto {
    #[validate(email(message = "Email format is invalid"))]
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordDto {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailDto {
    #[validate(length(min = 1, message = "Verification token is required"))]
    pub token: String,
}

/// Public projection of a user: what token-bearing responses expose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserReadDto {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl UserReadDto {
    pub fn from(model: User) -> UserReadDto {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
        }
    }
}

impl std::fmt::Debug for RegisterDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterDto")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

impl std::fmt::Debug for LoginDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginDto").field("email", &self.email).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_accepts_valid_payload() {
        let dto: RegisterDto = serde_json::from_str(
            r#"{"email":"dev@example.com","password":"secret1","role":"FREELANCER"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.role, Role::Freelancer);
    }

    #[test]
    fn register_rejects_short_password() {
        let dto: RegisterDto = serde_json::from_str(
            r#"{"email":"dev@example.com","password":"five5","role":"CLIENT"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn register_rejects_malformed_email() {
        let dto: RegisterDto = serde_json::from_str(
            r#"{"email":"not-an-address","password":"secret1","role":"CLIENT"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn register_rejects_unknown_role() {
        let result = serde_json::from_str::<RegisterDto>(
            r#"{"email":"dev@example.com","password":"secret1","role":"ADMIN"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        let dto: LoginDto =
            serde_json::from_str(r#"{"email":"","password":"secret1"}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: LoginDto =
            serde_json::from_str(r#"{"email":"dev@example.com","password":""}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn login_allows_malformed_email_through_validation() {
        // Format problems surface as 401 at credential check, not 400 here.
        let dto: LoginDto =
            serde_json::from_str(r#"{"email":"not-an-address","password":"x"}"#).unwrap();
        assert!(dto.validate().is_ok());
    }
}
