//! Spreadsheet change webhook
//!
//! Every request is classified and audited before the body is looked at.
//! Unrecognised callers get a 401 listing the accepted ways to authenticate.

use crate::auth::{AuditEvent, ClassificationResult};
use crate::server::middleware::{RequestId, extract_bearer_token};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const WEBHOOK_PATH: &str = "/webhook/spreadsheet-change";

/// Path the Cloud Function was deployed under
pub const LEGACY_WEBHOOK_PATH: &str = "/onSpreadsheetChange";

/// Configure webhook routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(WEBHOOK_PATH, web::post().to(spreadsheet_change))
        .route(LEGACY_WEBHOOK_PATH, web::post().to(spreadsheet_change));
}

/// Change notification posted by the Apps Script trigger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetChange {
    pub spreadsheet_id: Option<String>,
    pub sheet_name: Option<String>,
    pub range: Option<String>,
    pub change_type: Option<String>,
    /// Editor reported by the trigger, as a string or an object
    pub user: Option<serde_json::Value>,
    /// ISO-8601 string or epoch milliseconds
    pub timestamp: Option<serde_json::Value>,
    /// Fields this service does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of a 401 from the webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnauthorizedResponse {
    pub error: String,
    pub message: String,
    pub auth_options: Vec<String>,
}

/// Body of an accepted notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
    pub auth_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub received_at: chrono::DateTime<chrono::Utc>,
    pub request_id: String,
}

pub async fn spreadsheet_change(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse> {
    let request_id = RequestId::of(&req);

    let result = state
        .classifier
        .classify(req.headers(), extract_bearer_token(req.headers()))
        .await;

    state
        .audit
        .record(&AuditEvent::from_result(&result, request_id.as_str(), req.path()));

    if let Some(rejection) = result.rejection() {
        return Ok(HttpResponse::Unauthorized().json(UnauthorizedResponse {
            error: "Unauthorized".to_string(),
            message: rejection.message.clone(),
            auth_options: rejection.allowed_auth_methods.clone(),
        }));
    }

    let body = read_body(payload, state.config.server().max_body_size).await?;
    let change = parse_change(&body)?;

    info!(
        request_id = %request_id,
        auth_type = %result.category(),
        spreadsheet_id = change.spreadsheet_id.as_deref().unwrap_or("-"),
        sheet = change.sheet_name.as_deref().unwrap_or("-"),
        range = change.range.as_deref().unwrap_or("-"),
        change_type = change.change_type.as_deref().unwrap_or("-"),
        "Spreadsheet change received"
    );

    Ok(HttpResponse::Ok().json(acknowledge(&result, request_id)))
}

/// Read the body only once the caller is admitted, stopping at `limit` bytes
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(GatewayError::payload_too_large(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// An empty body is an empty notification
fn parse_change(body: &[u8]) -> Result<SpreadsheetChange> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SpreadsheetChange::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| GatewayError::validation(format!("Invalid JSON payload: {}", e)))
}

fn acknowledge(result: &ClassificationResult, request_id: String) -> WebhookAck {
    WebhookAck {
        success: true,
        message: "Spreadsheet change processed".to_string(),
        auth_type: result.category().as_str().to_string(),
        user_id: result.identity().map(|i| i.subject_id.clone()),
        received_at: chrono::Utc::now(),
        request_id,
    }
}
