//! Inbound request classification
//!
//! Decides, for a single request, whether the caller is a verified Firebase
//! user, a Google service, a developer, or nobody we recognise.

use super::heuristics::ServiceHeuristics;
use super::types::{ClassificationResult, HeaderSource, Rejection};
use super::verifier::{TokenVerifier, verify_with_timeout};
use crate::config::{AuthConfig, TokenFailurePolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Value of the development header that enables development mode
const DEVELOPMENT_FLAG: &str = "true";

/// Request classifier shared across workers
#[derive(Clone)]
pub struct RequestClassifier {
    verifier: Arc<dyn TokenVerifier>,
    heuristics: ServiceHeuristics,
    policy: TokenFailurePolicy,
    verify_timeout: Duration,
    /// `None` when the development header is disabled
    development_header: Option<String>,
}

impl std::fmt::Debug for RequestClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClassifier")
            .field("heuristics", &self.heuristics)
            .field("policy", &self.policy)
            .field("verify_timeout", &self.verify_timeout)
            .field("development_header", &self.development_header)
            .finish_non_exhaustive()
    }
}

impl RequestClassifier {
    pub fn new(verifier: Arc<dyn TokenVerifier>, config: &AuthConfig) -> Self {
        Self {
            verifier,
            heuristics: ServiceHeuristics::new(&config.service_heuristics),
            policy: config.token_failure_policy,
            verify_timeout: config.verify_timeout(),
            development_header: config
                .allow_development_header
                .then(|| config.development_header.trim().to_ascii_lowercase()),
        }
    }

    pub fn policy(&self) -> TokenFailurePolicy {
        self.policy
    }

    /// Classify one request.
    ///
    /// Rules are applied in order and the first match wins: bearer token,
    /// service heuristics, development header, rejection. An empty or
    /// whitespace-only token counts as absent.
    pub async fn classify<H>(&self, headers: &H, bearer_token: Option<&str>) -> ClassificationResult
    where
        H: HeaderSource + ?Sized,
    {
        let token = bearer_token.map(str::trim).filter(|t| !t.is_empty());

        if let Some(token) = token {
            return self.classify_token(token).await;
        }

        if let Some(rule) = self.heuristics.matching_rule(headers) {
            debug!(rule, "Request recognised as Google service");
            return ClassificationResult::google_service();
        }

        if self.development_mode(headers) {
            debug!("Request admitted in development mode");
            return ClassificationResult::development();
        }

        ClassificationResult::unauthenticated(Rejection::authentication_required())
    }

    async fn classify_token(&self, token: &str) -> ClassificationResult {
        match verify_with_timeout(self.verifier.as_ref(), token, self.verify_timeout).await {
            Ok(verified) => ClassificationResult::firebase_user(verified.identity()),
            Err(e) => match self.policy {
                TokenFailurePolicy::FailOpen => {
                    warn!("Token verification failed, treating caller as Google service: {}", e);
                    ClassificationResult::google_service()
                }
                TokenFailurePolicy::FailClosed => {
                    warn!("Token verification failed, rejecting request: {}", e);
                    ClassificationResult::unauthenticated(Rejection::authentication_required())
                }
            },
        }
    }

    fn development_mode<H: HeaderSource + ?Sized>(&self, headers: &H) -> bool {
        self.development_header
            .as_deref()
            .and_then(|name| headers.header(name))
            .is_some_and(|value| value == DEVELOPMENT_FLAG)
    }
}
