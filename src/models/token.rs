use serde::{Deserialize, Serialize};

/// Body of `POST /jwt`. Only the email is signed; nothing is persisted.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}
