//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod auth;
pub mod gateway;
pub mod logging;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use gateway::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3001
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Requests allowed per client per window
pub fn default_rate_limit_max_requests() -> u32 {
    100
}

/// Rate limit window in seconds (15 minutes)
pub fn default_rate_limit_window() -> u64 {
    15 * 60
}

pub fn default_verify_timeout_ms() -> u64 {
    5000
}

pub fn default_jwks_url() -> String {
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com"
        .to_string()
}

pub fn default_project_header() -> String {
    "x-apps-script-project".to_string()
}

pub fn default_development_header() -> String {
    "x-development-mode".to_string()
}

pub fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

pub fn default_firestore_database() -> String {
    "(default)".to_string()
}

pub fn default_collection() -> String {
    "poc".to_string()
}

pub fn default_document() -> String {
    "pocid".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
