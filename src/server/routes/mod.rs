//! HTTP route modules

pub mod health;
pub mod poc;
pub mod profile;
pub mod webhook;

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

/// `{ "data": ... }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register every route on `cfg`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(poc::configure_routes)
        .configure(profile::configure_routes)
        .configure(webhook::configure_routes);
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" }))
}
