use crate::models::TokenRequest;
use crate::services::JwtService;
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed token, returned as plain text", body = String, content_type = "text/plain"),
        (status = 500, description = "Token could not be signed")
    )
)]
pub async fn issue_token(jwt: web::Data<JwtService>, body: web::Json<TokenRequest>) -> HttpResponse {
    log::info!("🔐 POST /jwt - email: {}", body.email);

    match jwt.issue(&body.email) {
        Ok(token) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(token),
        Err(e) => {
            log::error!("❌ Error generating JWT token: {}", e);
            e.error_response()
        }
    }
}
