//! Common test utilities for firegate
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures::{TokenFactory, test_config};
//!
//! let tokens = TokenFactory::new();
//! let token = tokens.valid("user-1");
//! ```

pub mod assertions;
pub mod fixtures;

pub use fixtures::{PROJECT_ID, TokenFactory, static_verifier, test_config, test_state};
