//! Authentication and classification types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trust category assigned to an inbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthCategory {
    /// Caller presented a verified Firebase ID token
    FirebaseUser,
    /// Caller looks like a Google service (Apps Script) or presented an unverifiable token
    GoogleService,
    /// Caller opted into development mode
    Development,
    /// No recognised credential
    Unauthenticated,
}

impl AuthCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirebaseUser => "firebase_user",
            Self::GoogleService => "google_service",
            Self::Development => "development",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl std::fmt::Display for AuthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal verified identity of a Firebase user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub email: Option<String>,
}

/// Why a request was not admitted, and how it could have been
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub message: String,
    pub allowed_auth_methods: Vec<String>,
}

impl Rejection {
    pub const MESSAGE: &'static str = "Authentication required. Provide a Firebase ID token, call from Google Apps Script, or enable development mode.";

    pub const AUTH_METHODS: [&'static str; 3] = [
        "Firebase ID token (Authorization: Bearer <token>)",
        "Google Apps Script (Google user agent, script.google.com origin, or X-Apps-Script-Project header)",
        "Development mode (X-Development-Mode: true)",
    ];

    /// The fixed rejection returned for unauthenticated callers
    pub fn authentication_required() -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            allowed_auth_methods: Self::AUTH_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Outcome of classifying one request.
///
/// Fields are private so the category, identity and rejection can only be
/// combined through the constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    authenticated: bool,
    category: AuthCategory,
    identity: Option<Identity>,
    rejection: Option<Rejection>,
}

impl ClassificationResult {
    pub fn firebase_user(identity: Identity) -> Self {
        Self {
            authenticated: true,
            category: AuthCategory::FirebaseUser,
            identity: Some(identity),
            rejection: None,
        }
    }

    pub fn google_service() -> Self {
        Self::admitted(AuthCategory::GoogleService)
    }

    pub fn development() -> Self {
        Self::admitted(AuthCategory::Development)
    }

    pub fn unauthenticated(rejection: Rejection) -> Self {
        Self {
            authenticated: false,
            category: AuthCategory::Unauthenticated,
            identity: None,
            rejection: Some(rejection),
        }
    }

    fn admitted(category: AuthCategory) -> Self {
        Self {
            authenticated: true,
            category,
            identity: None,
            rejection: None,
        }
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn category(&self) -> AuthCategory {
        self.category
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }
}

/// Read-only view over request headers.
///
/// Lookups are case-insensitive. Missing, empty and non-UTF-8 values are all
/// reported as `None`. When a name carries several values the first usable
/// one wins.
pub trait HeaderSource {
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for actix_web::http::header::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .filter_map(|v| v.to_str().ok())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }
}

/// Keys differing only in case are visited in byte order of the key, so the
/// result does not depend on hash iteration order.
impl HeaderSource for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .filter(|(k, v)| k.eq_ignore_ascii_case(name) && !v.trim().is_empty())
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.trim())
    }
}
