//! Firebase ID token verifier

use super::keys::KeyStore;
use super::types::FirebaseClaims;
use crate::auth::verifier::{TokenVerifier, VerificationError, VerifiedToken};
use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use crate::utils::logging::redact_token;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};
use tracing::debug;

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Clock skew tolerated on `exp`, `iat` and `auth_time`, in seconds
const LEEWAY_SECS: u64 = 60;

/// Longest `sub` Firebase issues
const MAX_UID_LEN: usize = 128;

/// Verifies Firebase ID tokens for a single project
#[derive(Debug)]
pub struct FirebaseTokenVerifier {
    project_id: String,
    issuer: String,
    keys: KeyStore,
}

impl FirebaseTokenVerifier {
    /// Create a verifier that fetches keys from the configured JWKS URL
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.verify_timeout())
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_keys(
            config.firebase_project_id.clone(),
            KeyStore::remote(client, config.jwks_url.clone()),
        ))
    }

    /// Create a verifier over an explicit key store
    pub fn with_keys(project_id: impl Into<String>, keys: KeyStore) -> Self {
        let project_id = project_id.into();
        Self {
            issuer: format!("{}{}", ISSUER_PREFIX, project_id),
            project_id,
            keys,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "aud", "iss"]);
        validation.leeway = LEEWAY_SECS;
        validation
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> std::result::Result<VerifiedToken, VerificationError> {
        if self.project_id.is_empty() {
            return Err(VerificationError::failed("Firebase project is not configured"));
        }

        let header = decode_header(token)
            .map_err(|e| VerificationError::failed(format!("malformed token: {}", e)))?;

        if header.alg != Algorithm::RS256 {
            return Err(VerificationError::failed(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| VerificationError::failed("token has no key ID"))?;

        let key = self.keys.get(&kid).await?;

        let data = decode::<FirebaseClaims>(token, &key, &self.validation())
            .map_err(|e| VerificationError::failed(e.to_string()))?;
        let claims = data.claims;

        if claims.sub.is_empty() || claims.sub.chars().count() > MAX_UID_LEN {
            return Err(VerificationError::failed("invalid subject"));
        }

        let now = chrono::Utc::now().timestamp();
        let leeway = LEEWAY_SECS as i64;
        if claims.iat > now + leeway {
            return Err(VerificationError::failed("token issued in the future"));
        }
        if claims.auth_time.is_some_and(|t| t > now + leeway) {
            return Err(VerificationError::failed("auth_time is in the future"));
        }

        debug!(
            uid = %claims.sub,
            token = %redact_token(token),
            "Firebase ID token verified"
        );
        Ok(claims.into_verified())
    }
}
