use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried inside a signed admin session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Operator identity
    pub sub: String,

    /// Expiry as a unix timestamp in seconds
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(sub: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: sub.into(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}
