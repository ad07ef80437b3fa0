//! Application state shared across HTTP handlers

use crate::auth::{AuditSink, RequestClassifier, TokenVerifier};
use crate::config::Config;
use crate::server::middleware::RateLimiter;
use crate::storage::DocumentStore;
use std::sync::Arc;
use std::time::Instant;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in `Arc` so cloning the state per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Verifier behind the Firebase gate
    pub verifier: Arc<dyn TokenVerifier>,
    /// Webhook request classifier, sharing `verifier`
    pub classifier: Arc<RequestClassifier>,
    /// Store holding the POC document
    pub store: Arc<DocumentStore>,
    /// Destination of classification audit records
    pub audit: Arc<dyn AuditSink>,
    pub rate_limiter: Arc<RateLimiter>,
    pub started_at: Instant,
}

impl AppState {
    /// Create state from explicit collaborators
    pub fn new(
        config: Config,
        verifier: Arc<dyn TokenVerifier>,
        store: DocumentStore,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let classifier = RequestClassifier::new(Arc::clone(&verifier), config.auth());
        let rate_limiter = RateLimiter::new(&config.server().rate_limit);
        Self {
            config: Arc::new(config),
            verifier,
            classifier: Arc::new(classifier),
            store: Arc::new(store),
            audit,
            rate_limiter: Arc::new(rate_limiter),
            started_at: Instant::now(),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
