//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a bearer token that fails identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenFailurePolicy {
    /// Admit the caller as a lower-trust Google service
    #[default]
    FailOpen,
    /// Reject the request as unauthenticated
    FailClosed,
}

impl std::str::FromStr for TokenFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_open" | "fail-open" | "open" => Ok(Self::FailOpen),
            "fail_closed" | "fail-closed" | "closed" => Ok(Self::FailClosed),
            other => Err(format!("Unknown token failure policy: {}", other)),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Firebase project whose ID tokens are accepted
    #[serde(default)]
    pub firebase_project_id: String,
    /// JWK set publishing the token signing keys
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,
    /// Upper bound on a single verification call, in milliseconds
    #[serde(default = "default_verify_timeout_ms")]
    pub verify_timeout_ms: u64,
    #[serde(default)]
    pub token_failure_policy: TokenFailurePolicy,
    /// Honour the development-mode request header
    #[serde(default = "default_true")]
    pub allow_development_header: bool,
    #[serde(default = "default_development_header")]
    pub development_header: String,
    #[serde(default)]
    pub service_heuristics: ServiceHeuristicsConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            firebase_project_id: String::new(),
            jwks_url: default_jwks_url(),
            verify_timeout_ms: default_verify_timeout_ms(),
            token_failure_policy: TokenFailurePolicy::default(),
            allow_development_header: true,
            development_header: default_development_header(),
            service_heuristics: ServiceHeuristicsConfig::default(),
        }
    }
}

impl AuthConfig {
    pub fn verify_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.verify_timeout_ms)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.verify_timeout_ms == 0 {
            return Err("verify_timeout_ms must be greater than 0".to_string());
        }

        if self.verify_timeout_ms > 60_000 {
            return Err("verify_timeout_ms should not exceed 60 seconds".to_string());
        }

        if url::Url::parse(&self.jwks_url).is_err() {
            return Err(format!("Invalid JWKS URL: {}", self.jwks_url));
        }

        if self.development_header.trim().is_empty() {
            return Err("development_header cannot be empty".to_string());
        }

        self.service_heuristics.validate()
    }
}

/// Allow-lists used to recognise Google service callers without a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHeuristicsConfig {
    /// Substrings matched against `User-Agent`
    #[serde(default = "default_user_agent_substrings")]
    pub user_agent_substrings: Vec<String>,
    /// Substrings matched against `Referer` and `Origin`
    #[serde(default = "default_domain_substrings")]
    pub domain_substrings: Vec<String>,
    /// Header whose presence marks an Apps Script caller
    #[serde(default = "default_project_header")]
    pub project_header: String,
}

impl Default for ServiceHeuristicsConfig {
    fn default() -> Self {
        Self {
            user_agent_substrings: default_user_agent_substrings(),
            domain_substrings: default_domain_substrings(),
            project_header: default_project_header(),
        }
    }
}

impl ServiceHeuristicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self
            .user_agent_substrings
            .iter()
            .chain(&self.domain_substrings)
            .any(|s| s.trim().is_empty())
        {
            // An empty needle would match every request.
            return Err("Service heuristic substrings cannot be empty".to_string());
        }
        if self.project_header.trim().is_empty() {
            return Err("project_header cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_user_agent_substrings() -> Vec<String> {
    vec!["Google".to_string()]
}

fn default_domain_substrings() -> Vec<String> {
    vec!["script.google.com".to_string(), "google.com".to_string()]
}

/// Warn about insecure configuration
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.firebase_project_id.is_empty() {
        warn!(
            "firebase_project_id is not set; every bearer token will fail verification"
        );
    }
    if config.token_failure_policy == TokenFailurePolicy::FailOpen {
        warn!(
            "Token failure policy is fail_open: bearer tokens that fail verification are admitted as Google service callers"
        );
    }
    if config.allow_development_header {
        warn!(
            header = %config.development_header,
            "Development-mode header is honoured. Disable allow_development_header in production."
        );
    }
}
