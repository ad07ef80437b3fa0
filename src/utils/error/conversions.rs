//! Type conversions for GatewayError

use super::types::GatewayError;

impl From<tokio::time::error::Elapsed> for GatewayError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        GatewayError::Timeout(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::Config(format!("Invalid URL: {}", err))
    }
}

impl From<actix_web::error::PayloadError> for GatewayError {
    fn from(err: actix_web::error::PayloadError) -> Self {
        GatewayError::Validation(format!("Failed to read request body: {}", err))
    }
}
