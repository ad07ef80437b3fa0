//! Health check endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Liveness report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub uptime_seconds: u64,
    pub storage: Cow<'static, str>,
}

/// Basic health check endpoint
///
/// Unauthenticated and exempt from rate limiting; used by load balancers.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("OK"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        uptime_seconds: state.uptime_secs(),
        storage: Cow::Borrowed(state.store.backend()),
    };

    Ok(HttpResponse::Ok().json(health_status))
}
