//! POC document endpoints

use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::{DataResponse, MessageResponse};
use crate::server::state::AppState;
use crate::storage::Document;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// Configure POC document routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/poc")
            .route(web::get().to(get_poc))
            .route(web::put().to(update_poc)),
    );
}

#[derive(Debug, Deserialize)]
pub struct UpdatePocRequest {
    #[serde(default)]
    pub helloword: Option<Value>,
}

/// Read the POC document
pub async fn get_poc(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let storage = state.config.storage();

    let document = state
        .store
        .get(&storage.collection, &storage.document)
        .await?
        .ok_or_else(|| GatewayError::not_found("POC document not found"))?;

    Ok(HttpResponse::Ok().json(DataResponse { data: document }))
}

/// Merge `helloword` into the POC document
pub async fn update_poc(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<UpdatePocRequest>,
) -> Result<HttpResponse> {
    let helloword = body
        .into_inner()
        .helloword
        .filter(is_present)
        .ok_or_else(|| GatewayError::validation("helloword field is required"))?;

    let storage = state.config.storage();
    let mut fields = Document::new();
    fields.insert("helloword".to_string(), helloword);

    state
        .store
        .merge(&storage.collection, &storage.document, fields)
        .await?;

    info!(uid = %user.uid, "POC document updated");
    Ok(HttpResponse::Ok().json(MessageResponse::new("POC data updated successfully")))
}

/// Null, `false`, zero and the empty string count as missing
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
