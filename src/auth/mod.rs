//! Authentication and request classification
//!
//! This module decides who is calling: verified Firebase users, Google
//! services such as Apps Script, developers, or unknown callers.

pub mod audit;
pub mod classifier;
pub mod firebase;
pub mod heuristics;
pub mod types;
pub mod verifier;

pub use audit::{AuditEvent, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use classifier::RequestClassifier;
pub use firebase::FirebaseTokenVerifier;
pub use heuristics::ServiceHeuristics;
pub use types::{AuthCategory, ClassificationResult, HeaderSource, Identity, Rejection};
pub use verifier::{TokenVerifier, VerificationError, VerifiedToken, verify_with_timeout};
