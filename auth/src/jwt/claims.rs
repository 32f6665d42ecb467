use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// `user_id` and `username` are a snapshot taken at issuance; they are not
/// re-checked against the credential store when the token is verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id rendered as a string)
    pub sub: String,

    /// Numeric user id
    pub user_id: i64,

    /// Username at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Fixed token lifetime.
    pub const LIFETIME_HOURS: i64 = 72;

    /// Build claims for an identity, valid for 72 hours from `issued_at`.
    pub fn for_identity(user_id: i64, username: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        let expires_at = issued_at + Duration::hours(Self::LIFETIME_HOURS);

        Self {
            sub: user_id.to_string(),
            user_id,
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is already expired at the exact second of `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
