//! Error handling for the gateway
//!
//! This module defines the error type shared by every layer of the service
//! and its mapping onto HTTP responses.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::ErrorResponse;
pub use types::{GatewayError, Result};
