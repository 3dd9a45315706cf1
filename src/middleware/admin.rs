use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::{Claims, Record, User};
use crate::services::user_service;
use crate::utils::AppError;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

/// Authorization gate: an authenticated caller whose user record has role "admin".
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub claims: Claims,
    pub user: Record<User>,
}

/// Role decision for a caller whose user record has already been looked up.
pub fn authorize(claims: Claims, user: Option<Record<User>>) -> Result<AdminUser, AppError> {
    let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !user.data.is_admin() {
        log::warn!("⛔ {} is not an admin", claims.email);
        return Err(AppError::Forbidden);
    }

    Ok(AdminUser { claims, user })
}

pub async fn require_admin(db: &MongoDB, claims: Claims) -> Result<AdminUser, AppError> {
    let user = user_service::find_by_email(db, &claims.email).await?;
    authorize(claims, user)
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = AuthUser::authenticate(req);
        let db = req.app_data::<web::Data<MongoDB>>().cloned();

        Box::pin(async move {
            let claims = claims?;
            let db = db.ok_or_else(|| {
                AppError::ConfigError("MongoDB is not registered as app data".to_string())
            })?;
            require_admin(&db, claims).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use mongodb::bson::oid::ObjectId;

    fn claims(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            iat: 0,
            exp: 0,
        }
    }

    fn user(email: &str, role: Option<&str>) -> Record<User> {
        Record::new(
            ObjectId::new(),
            User {
                name: Some("Ana".into()),
                email: Some(email.to_string()),
                role: role.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let err = authorize(claims("ghost@mail.com"), None).unwrap_err();
        assert!(matches!(&err, AppError::NotFound(msg) if msg == "User not found"));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_non_admin_is_forbidden() {
        let err = authorize(claims("ana@mail.com"), Some(user("ana@mail.com", Some("user")))).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert_eq!(err.public_message(), "forbidden access");

        let err = authorize(claims("ana@mail.com"), Some(user("ana@mail.com", None))).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_admin_is_let_through() {
        let admin = authorize(claims("boss@mail.com"), Some(user("boss@mail.com", Some("admin")))).unwrap();
        assert_eq!(admin.claims.email, "boss@mail.com");
        assert!(admin.user.data.is_admin());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_require_admin_against_database() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "ContestHubDB_test").await.unwrap();

        let email = format!("{}@admin-gate.test", ObjectId::new().to_hex());
        let missing = require_admin(&db, claims(&email)).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        user_service::create_user(
            &db,
            User {
                email: Some(email.clone()),
                role: Some("user".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let forbidden = require_admin(&db, claims(&email)).await;
        assert!(matches!(forbidden, Err(AppError::Forbidden)));

        user_service::update_role(
            &db,
            &email,
            &crate::models::UpdateRoleRequest {
                role: Some("admin".into()),
            },
        )
        .await
        .unwrap();
        let admin = require_admin(&db, claims(&email)).await.unwrap();
        assert_eq!(admin.claims.email, email);
    }
}
