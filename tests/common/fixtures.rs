//! Test fixtures and data factories
//!
//! Tokens are signed with `tests/fixtures/firebase_test_key.pem`, whose public
//! half is published as `test-key-1` in `firebase_test_jwks.json`.

use actix_web::web;
use firegate::auth::firebase::KeyStore;
use firegate::auth::{FirebaseTokenVerifier, MemoryAuditSink, TokenVerifier};
use firegate::config::Config;
use firegate::server::AppState;
use firegate::storage::{DocumentStore, MemoryStore};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use std::sync::Arc;

pub const PROJECT_ID: &str = "firegate-test";
pub const KEY_ID: &str = "test-key-1";
pub const PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/firebase_test_key.pem");
pub const JWKS: &str = include_str!("../fixtures/firebase_test_jwks.json");

/// Factory for signed Firebase ID tokens
pub struct TokenFactory {
    key: EncodingKey,
    project_id: String,
}

impl TokenFactory {
    pub fn new() -> Self {
        Self::for_project(PROJECT_ID)
    }

    pub fn for_project(project_id: &str) -> Self {
        Self {
            key: EncodingKey::from_rsa_pem(PRIVATE_KEY).expect("fixture key parses"),
            project_id: project_id.to_string(),
        }
    }

    /// Claims of a fresh token for `uid`
    pub fn claims(&self, uid: &str) -> Value {
        let now = chrono::Utc::now().timestamp();
        json!({
            "sub": uid,
            "user_id": uid,
            "aud": self.project_id,
            "iss": format!("https://securetoken.google.com/{}", self.project_id),
            "iat": now - 30,
            "exp": now + 3600,
            "auth_time": now - 30,
            "email": format!("{}@example.com", uid),
            "email_verified": true,
            "name": "Test User",
            "firebase": {"sign_in_provider": "password"}
        })
    }

    pub fn sign(&self, claims: &Value) -> String {
        self.sign_with_kid(claims, KEY_ID)
    }

    pub fn sign_with_kid(&self, claims: &Value, kid: &str) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        jsonwebtoken::encode(&header, claims, &self.key).expect("token signs")
    }

    pub fn valid(&self, uid: &str) -> String {
        self.sign(&self.claims(uid))
    }

    pub fn expired(&self, uid: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let mut claims = self.claims(uid);
        claims["iat"] = json!(now - 7200);
        claims["auth_time"] = json!(now - 7200);
        claims["exp"] = json!(now - 3600);
        self.sign(&claims)
    }
}

impl Default for TokenFactory {
    fn default() -> Self {
        Self::new()
    }
}

pub fn jwk_set() -> JwkSet {
    serde_json::from_str(JWKS).expect("fixture JWKS parses")
}

/// Verifier trusting only the fixture key
pub fn static_verifier() -> Arc<dyn TokenVerifier> {
    Arc::new(FirebaseTokenVerifier::with_keys(
        PROJECT_ID,
        KeyStore::from_jwk_set(&jwk_set()),
    ))
}

/// Default configuration for the test project
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.gateway.auth.firebase_project_id = PROJECT_ID.to_string();
    config
}

/// Application state over an in-memory store, returning the audit sink for inspection
pub fn test_state(config: Config) -> (web::Data<AppState>, Arc<MemoryAuditSink>) {
    let audit = Arc::new(MemoryAuditSink::new());
    let state = AppState::new(
        config,
        static_verifier(),
        DocumentStore::Memory(MemoryStore::new()),
        audit.clone(),
    );
    (web::Data::new(state), audit)
}
