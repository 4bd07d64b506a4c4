use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration-time account type. Immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Freelancer,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Freelancer => "FREELANCER",
            Role::Client => "CLIENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account lifecycle state. Accounts start at PendingVerification; login is
/// refused only for Suspended/Inactive, while the authorization gate requires
/// Active on every authenticated request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    PendingVerification,
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::PendingVerification => "PENDING_VERIFICATION",
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
    pub email_verified: bool,
    pub verification_token_hash: Option<String>,
    pub password_reset_token_hash: Option<String>,
    pub password_reset_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Credential digests stay out of debug output.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("status", &self.status)
            .field("email_verified", &self.email_verified)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::Freelancer).unwrap(),
            "\"FREELANCER\""
        );
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"CLIENT\"");
        let parsed: Role = serde_json::from_str("\"CLIENT\"").unwrap();
        assert_eq!(parsed, Role::Client);
    }

    #[test]
    fn role_rejects_unknown_values() {
        assert!(serde_json::from_str::<Role>("\"ADMIN\"").is_err());
        assert!(serde_json::from_str::<Role>("\"client\"").is_err());
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&UserStatus::PendingVerification).unwrap(),
            "\"PENDING_VERIFICATION\""
        );
        let parsed: UserStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(parsed, UserStatus::Suspended);
    }

    #[test]
    fn debug_output_omits_credential_digest() {
        let user = User {
            id: Uuid::now_v7(),
            email: "dev@example.com".to_string(),
            password: "$2b$12$secret-digest".to_string(),
            role: Role::Freelancer,
            status: UserStatus::Active,
            email_verified: true,
            verification_token_hash: None,
            password_reset_token_hash: Some("reset-digest".to_string()),
            password_reset_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let rendered = format!("{:?}", user);
        assert!(rendered.contains("dev@example.com"));
        assert!(!rendered.contains("secret-digest"));
        assert!(!rendered.contains("reset-digest"));
    }
}
