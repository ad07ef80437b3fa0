//! Firebase ID token claims

use crate::auth::verifier::VerifiedToken;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a Firebase ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseClaims {
    /// Firebase user ID
    pub sub: String,
    pub aud: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// When the user authenticated, seconds since epoch
    #[serde(default)]
    pub auth_time: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl FirebaseClaims {
    pub(super) fn into_verified(self) -> VerifiedToken {
        VerifiedToken {
            uid: self.sub,
            email: self.email,
            email_verified: self.email_verified.unwrap_or(false),
            name: self.name,
            picture: self.picture,
            issued_at: timestamp(self.iat),
            expires_at: timestamp(self.exp),
        }
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
