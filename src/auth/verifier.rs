//! Token verifier contract
//!
//! The classifier and the Firebase gate only see this trait; the concrete
//! Firebase implementation lives in [`crate::auth::firebase`].

use super::types::Identity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a bearer token could not be turned into a verified identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The token was checked and rejected
    #[error("Token verification failed: {0}")]
    TokenVerificationFailed(String),

    /// The token could not be checked (timeout, network, key fetch)
    #[error("Token verifier unavailable: {0}")]
    VerifierUnavailable(String),
}

impl VerificationError {
    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self::TokenVerificationFailed(message.into())
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::VerifierUnavailable(message.into())
    }
}

/// Claims of a successfully verified ID token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedToken {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerifiedToken {
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.uid.clone(),
            email: self.email.clone(),
        }
    }
}

/// Verifies bearer tokens against a trusted issuer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, VerificationError>;
}

/// Run `verifier` with an upper bound; a timeout counts as the verifier being unavailable.
pub async fn verify_with_timeout(
    verifier: &dyn TokenVerifier,
    token: &str,
    timeout: std::time::Duration,
) -> Result<VerifiedToken, VerificationError> {
    match tokio::time::timeout(timeout, verifier.verify(token)).await {
        Ok(result) => result,
        Err(_) => Err(VerificationError::unavailable(format!(
            "verification timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}
