use crate::dto::user_dto::UserReadDto;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Claims carried by both access and refresh tokens. Only `sub` is trusted
/// downstream; role and status are always re-fetched from the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub iss: String,
    pub aud: String,
}

/// A freshly signed token plus its timestamps.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenReadDto {
    pub token: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequestDto {
    #[serde(rename = "refreshToken")]
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequestDto {
    #[serde(rename = "refreshToken")]
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Body of register/login success responses (flattened into the envelope).
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthResponseDto {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub user: UserReadDto,
}

/// Body of refresh-token success responses.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshResponseDto {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: UserReadDto,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::user::Role;

    #[test]
    fn refresh_request_uses_camel_case_wire_name() {
        let dto: RefreshTokenRequestDto =
            serde_json::from_str(r#"{"refreshToken":"abc"}"#).unwrap();
        assert_eq!(dto.refresh_token, "abc");

        assert!(serde_json::from_str::<RefreshTokenRequestDto>(r#"{"refresh_token":"abc"}"#)
            .is_err());
    }

    #[test]
    fn auth_response_serializes_documented_field_names() {
        let body = serde_json::to_value(AuthResponseDto {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            user: UserReadDto {
                id: Uuid::now_v7(),
                email: "dev@example.com".to_string(),
                role: Role::Client,
            },
        })
        .unwrap();

        assert_eq!(body["accessToken"], "access");
        assert_eq!(body["refreshToken"], "refresh");
        assert_eq!(body["user"]["role"], "CLIENT");
    }
}
