use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued access token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Identity claims carried by an access token.
///
/// Constructed at issuance and reconstructed at validation; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    pub username: String,

    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always `iat` + 24 hours
    pub exp: i64,
}

impl Claims {
    /// Create claims issued at `issued_at`, expiring one TTL later.
    pub fn new(
        subject: impl ToString,
        username: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + Duration::hours(TOKEN_TTL_HOURS);

        Self {
            sub: subject.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// A token is still valid during the exact second it expires.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
