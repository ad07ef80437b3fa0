//! User profile endpoint

use crate::server::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

/// Configure profile routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/user/profile", web::get().to(get_profile));
}

/// Profile claims of the calling user; absent claims are omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

pub async fn get_profile(user: AuthenticatedUser) -> HttpResponse {
    let AuthenticatedUser(token) = user;
    HttpResponse::Ok().json(UserProfile {
        uid: token.uid,
        email: token.email,
        name: token.name,
        picture: token.picture,
    })
}
