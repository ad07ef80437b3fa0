//! Firebase authentication gate
//!
//! Handlers that take an [`AuthenticatedUser`] only run for requests carrying
//! a verifiable Firebase ID token.

use crate::auth::{VerifiedToken, verify_with_timeout};
use crate::server::middleware::helpers::extract_bearer_token;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use tracing::{debug, warn};

/// Verified Firebase user behind the current request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub VerifiedToken);

impl Deref for AuthenticatedUser {
    type Target = VerifiedToken;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_bearer_token(req.headers()).map(str::to_string);

        Box::pin(async move {
            let state = state
                .ok_or_else(|| GatewayError::internal("Application state is not configured"))?;

            let token = token.ok_or_else(|| GatewayError::auth("Access token required"))?;

            let timeout = state.config.auth().verify_timeout();
            match verify_with_timeout(state.verifier.as_ref(), &token, timeout).await {
                Ok(verified) => {
                    debug!(uid = %verified.uid, "Firebase user authenticated");
                    Ok(AuthenticatedUser(verified))
                }
                Err(e) => {
                    warn!("Rejected Firebase token: {}", e);
                    Err(GatewayError::forbidden("Invalid token").into())
                }
            }
        })
    }
}
