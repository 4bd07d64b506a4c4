use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted refresh session. The signed token value itself is the row key:
/// refresh and logout both look rows up by the exact presented token.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_is_strict() {
        let now = Utc::now();
        let row = RefreshToken {
            token: "signed-token".to_string(),
            user_id: Uuid::now_v7(),
            expires_at: now,
            created_at: now - Duration::days(7),
        };

        assert!(row.is_expired(now));
        assert!(row.is_expired(now + Duration::seconds(1)));
        assert!(!row.is_expired(now - Duration::seconds(1)));
    }
}
