use crate::database::MongoDB;
use crate::middleware::AdminUser;
use crate::models::{ExistingUserResponse, UpdateResponse, UpdateRoleRequest, User};
use crate::services::user_service::{self, CreateUserOutcome};
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("token" = []))
)]
pub async fn list_users(admin: AdminUser, db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("👥 GET /users - by {}", admin.claims.email);

    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("❌ Error fetching users: {}", e);
            e.error_response()
        }
    }
}

/// Responds with JSON `null` when no user has this email.
#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "The user, or null", body = User))
)]
pub async fn get_user(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("👤 GET /users/{}", email);

    match user_service::find_by_email(&db, &email).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::error!("❌ Error fetching user: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = User,
    responses(
        (status = 200, description = "Created user, or the already-exists marker", body = ExistingUserResponse)
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, body: web::Json<User>) -> HttpResponse {
    let user = body.into_inner();
    log::info!("📝 POST /users - email: {}", user.email.as_deref().unwrap_or("N/A"));

    match user_service::create_user(&db, user).await {
        Ok(CreateUserOutcome::Created(user)) => HttpResponse::Ok().json(user),
        Ok(CreateUserOutcome::AlreadyExists(marker)) => HttpResponse::Ok().json(marker),
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Update result", body = UpdateResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("token" = []))
)]
pub async fn update_role(
    admin: AdminUser,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateRoleRequest>,
) -> HttpResponse {
    let email = path.into_inner();
    log::info!(
        "🛡️  PUT /users/{} - role: {:?} (by admin {})",
        email,
        body.role,
        admin.user.id
    );

    match user_service::update_role(&db, &email, &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating user role: {}", e);
            e.error_response()
        }
    }
}
