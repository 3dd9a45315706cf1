use crate::models::Claims;
use crate::services::JwtService;
use crate::utils::AppError;
use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Authentication gate. Reads the token verbatim from the `Authorization`
/// header (no `Bearer ` prefix) and verifies it with the shared secret.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn authenticate(req: &HttpRequest) -> Result<Claims, AppError> {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                log::warn!("🔒 {} {} - missing authorization header", req.method(), req.path());
                AppError::Unauthorized
            })?;

        let jwt = req.app_data::<web::Data<JwtService>>().ok_or_else(|| {
            AppError::ConfigError("JwtService is not registered as app data".to_string())
        })?;

        jwt.verify(token).map_err(|e| {
            log::warn!("🔒 {} {} - invalid token", req.method(), req.path());
            e
        })
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(AuthUser::authenticate(req).map(AuthUser))
    }
}
