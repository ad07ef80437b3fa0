//! Server builder and run_server function

use crate::auth::{AuditSink, TokenVerifier};
use crate::config::Config;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::storage::DocumentStore;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for swapping collaborators before start-up
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    verifier: Option<Arc<dyn TokenVerifier>>,
    store: Option<DocumentStore>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn with_store(mut self, store: DocumentStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Build application state, filling unset collaborators from configuration
    pub fn build_state(self) -> Result<AppState> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        let verifier: Arc<dyn TokenVerifier> = match self.verifier {
            Some(verifier) => verifier,
            None => Arc::new(crate::auth::FirebaseTokenVerifier::new(config.auth())?),
        };
        let store = match self.store {
            Some(store) => store,
            None => DocumentStore::new(config.storage(), &config.auth().firebase_project_id)?,
        };
        let audit = self
            .audit
            .unwrap_or_else(|| Arc::new(crate::auth::TracingAuditSink));

        Ok(AppState::new(config, verifier, store, audit))
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        Ok(HttpServer::with_state(self.build_state()?))
    }
}

/// Run the server with the given configuration
pub async fn run_server(config: Config) -> Result<()> {
    let build = crate::build_info();
    info!(
        "Starting firegate v{} (commit {}, built {})",
        build.version, build.git_hash, build.build_time
    );

    let server = ServerBuilder::new().with_config(config.clone()).build()?;

    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/poc - Read POC document");
    info!("   PUT  /api/poc - Update POC document");
    info!("   GET  /api/user/profile - Current user profile");
    info!("   POST /webhook/spreadsheet-change - Spreadsheet change webhook");

    server.start().await
}
