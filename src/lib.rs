//! # firegate
//!
//! Firebase-authenticated document gateway with a classified webhook receiver.
//!
//! ## Features
//!
//! - **Firebase ID tokens**: RS256 verification against Google's published keys
//! - **Request classification**: sorts webhook callers into Firebase users,
//!   Google services, development callers and unauthenticated requests
//! - **Document store**: single-document read and merge over Firestore REST or memory
//! - **Audit trail**: one structured record per classified request
//!
//! ## Classifying a request
//!
//! ```rust,no_run
//! use firegate::auth::{FirebaseTokenVerifier, RequestClassifier};
//! use firegate::config::AuthConfig;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # async fn run() -> firegate::Result<()> {
//! let config = AuthConfig {
//!     firebase_project_id: "my-project".to_string(),
//!     ..Default::default()
//! };
//! let classifier = RequestClassifier::new(Arc::new(FirebaseTokenVerifier::new(&config)?), &config);
//!
//! let headers = HashMap::from([("user-agent".to_string(), "Google-Apps-Script".to_string())]);
//! let result = classifier.classify(&headers, None).await;
//! assert!(result.authenticated());
//! # Ok(())
//! # }
//! ```
//!
//! ## Serving
//!
//! ```rust,no_run
//! use firegate::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/firegate.yaml").await?;
//!     config.validate()?;
//!     firegate::server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{AuthCategory, ClassificationResult, RequestClassifier};
pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert!(!info.version.is_empty());
        assert_eq!(info.version, VERSION);
        assert!(!info.git_hash.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "firegate");
        assert_eq!(DESCRIPTION, env!("CARGO_PKG_DESCRIPTION"));
    }
}
