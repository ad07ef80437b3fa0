//! Integration tests for firegate
//!
//! These tests verify the interaction between multiple components and use
//! real implementations; external HTTP services are replaced by local mock
//! servers.

pub mod classifier_tests;
pub mod config_tests;
pub mod firestore_app_tests;
pub mod http_api_tests;
pub mod key_rotation_tests;
