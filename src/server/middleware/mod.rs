//! HTTP middleware implementations
//!
//! - Firebase authentication gate (extractor)
//! - Rate limiting
//! - Request ID tracking
//! - Security headers

mod auth;
mod helpers;
mod rate_limit;
mod request_id;
mod security;


pub use auth::AuthenticatedUser;
pub use helpers::{client_key, extract_bearer_token, is_public_route};
pub use rate_limit::{RateLimitMiddleware, RateLimitMiddlewareService, RateLimiter};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware, RequestIdMiddlewareService};
pub use security::{SecurityHeadersMiddleware, SecurityHeadersMiddlewareService};
