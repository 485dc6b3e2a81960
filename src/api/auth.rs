use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::services::auth_service;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt - Issues a 30-day session token for the supplied payload.
/// The payload is signed verbatim; possession of the token is the only
/// credential the gated routes check.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed session token", body = TokenResponse)
    )
)]
pub async fn issue_token(payload: web::Json<Map<String, Value>>) -> impl Responder {
    match auth_service::issue_session_token(payload.into_inner()) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { token }),
        Err(e) => {
            log::error!("❌ Failed to issue session token: {}", e);
            e.to_response()
        }
    }
}
