//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Auth(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Forbidden(_) | GatewayError::Jwt(_) => StatusCode::FORBIDDEN,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::External(_) | GatewayError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Client-facing errors carry their own message; everything else is
        // logged and replaced with a generic one.
        let message = match self {
            GatewayError::Auth(msg)
            | GatewayError::Forbidden(msg)
            | GatewayError::Validation(msg)
            | GatewayError::NotFound(msg)
            | GatewayError::PayloadTooLarge(msg)
            | GatewayError::RateLimit(msg) => msg.clone(),
            GatewayError::Jwt(_) => "Invalid token".to_string(),
            other => {
                error!(error = %other, "Request failed");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: message,
            code: self.code().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub timestamp: i64,
}
