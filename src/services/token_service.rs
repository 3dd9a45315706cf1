use crate::models::Claims;
use crate::utils::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Issues and verifies the HS256 access tokens. Tokens are stateless: there is
/// no refresh, revocation or rotation.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::TokenError(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry. Any failure is reported as `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token.trim(), &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService::new(secret, Duration::days(100))
    }

    #[test]
    fn test_issue_and_verify() {
        let jwt = service("test-secret");
        let token = jwt.issue("creator@contesthub.app").unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.email, "creator@contesthub.app");
        assert_eq!(claims.exp - claims.iat, Duration::days(100).num_seconds());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service("test-secret").issue("a@b.c").unwrap();
        let result = service("another-secret").verify(&token);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default 60s validation leeway
        let jwt = JwtService::new("test-secret", Duration::hours(-2));
        let token = jwt.issue("a@b.c").unwrap();
        assert!(matches!(jwt.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let jwt = service("test-secret");
        assert!(jwt.verify("invalid.token.here").is_err());
        assert!(jwt.verify("").is_err());
    }

    #[test]
    fn test_bearer_prefix_is_not_stripped() {
        let jwt = service("test-secret");
        let token = jwt.issue("a@b.c").unwrap();
        assert!(jwt.verify(&format!("Bearer {}", token)).is_err());
    }
}
