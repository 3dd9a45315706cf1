use crate::api::parse_id;
use crate::database::MongoDB;
use crate::middleware::{AdminUser, AuthUser};
use crate::models::{
    AttendanceUpdate, Contest, ContestListQuery, ContestUpdate, DeleteResponse, PopularQuery, StatusUpdate,
    UpdateResponse, WinnerUpdate,
};
use crate::services::contest_service;
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    get,
    path = "/contests",
    tag = "Contests",
    params(ContestListQuery),
    responses(
        (status = 200, description = "`{ allContest, contestCount }`; contestCount counts accepted contests"),
        (status = 400, description = "Invalid sort order")
    )
)]
pub async fn list_contests(db: web::Data<MongoDB>, query: web::Query<ContestListQuery>) -> HttpResponse {
    log::info!("🏆 GET /contests - {:?}", query);

    match contest_service::list_contests(&db, &query).await {
        Ok(response) => {
            log::info!(
                "✅ Returning {} contests ({} accepted overall)",
                response.all_contest.len(),
                response.contest_count
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Error fetching contests: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/contests/popular",
    tag = "Contests",
    params(PopularQuery),
    responses((status = 200, description = "Up to 6 contests", body = [Contest]))
)]
pub async fn popular_contests(db: web::Data<MongoDB>, query: web::Query<PopularQuery>) -> HttpResponse {
    log::info!("🔥 GET /contests/popular - search: {:?}", query.search_value);

    match contest_service::popular_contests(&db, &query).await {
        Ok(contests) => HttpResponse::Ok().json(contests),
        Err(e) => {
            log::error!("❌ Error fetching popular contests: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/contests/{id}",
    tag = "Contests",
    params(("id" = String, Path, description = "Contest ObjectId")),
    responses(
        (status = 200, description = "The contest", body = Contest),
        (status = 404, description = "Contest not found")
    )
)]
pub async fn get_contest(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match contest_service::get_contest(&db, id).await {
        Ok(contest) => HttpResponse::Ok().json(contest),
        Err(e) => {
            log::error!("❌ Error fetching contest by ID {}: {}", id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/contests",
    tag = "Contests",
    request_body = Contest,
    responses(
        (status = 200, description = "The stored contest", body = Contest),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("token" = []))
)]
pub async fn create_contest(user: AuthUser, db: web::Data<MongoDB>, body: web::Json<Contest>) -> HttpResponse {
    log::info!(
        "➕ POST /contests - {:?} by {}",
        body.contest_name,
        user.email()
    );

    match contest_service::create_contest(&db, body.into_inner()).await {
        Ok(contest) => HttpResponse::Ok().json(contest),
        Err(e) => {
            log::error!("❌ Error creating contest: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/contests/{id}",
    tag = "Contests",
    params(("id" = String, Path, description = "Contest ObjectId")),
    request_body = ContestUpdate,
    responses(
        (status = 200, description = "Update result (upsert)", body = UpdateResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("token" = []))
)]
pub async fn update_contest(
    user: AuthUser,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<ContestUpdate>,
) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    log::info!("✏️  PUT /contests/{} by {}", id, user.email());

    match contest_service::update_contest(&db, id, &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating contest: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/contests/attendance/{id}",
    tag = "Contests",
    params(("id" = String, Path, description = "Contest ObjectId")),
    request_body = AttendanceUpdate,
    responses((status = 200, description = "Update result (upsert)", body = UpdateResponse))
)]
pub async fn update_attendance(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<AttendanceUpdate>,
) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    log::info!("👥 PUT /contests/attendance/{} - {:?}", id, body.attendance);

    match contest_service::update_attendance(&db, id, &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating contest attendance: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/contests/winner/{id}",
    tag = "Contests",
    params(("id" = String, Path, description = "Contest ObjectId")),
    request_body = WinnerUpdate,
    responses(
        (status = 200, description = "Update result (upsert)", body = UpdateResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("token" = []))
)]
pub async fn update_winner(
    user: AuthUser,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<WinnerUpdate>,
) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    log::info!(
        "🥇 PUT /contests/winner/{} - {:?} (by {})",
        id,
        body.winner_email,
        user.email()
    );

    match contest_service::update_winner(&db, id, &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating contest winner: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    patch,
    path = "/contests/{id}",
    tag = "Contests",
    params(("id" = String, Path, description = "Contest ObjectId")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Update result (upsert)", body = UpdateResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("token" = []))
)]
pub async fn update_status(
    admin: AdminUser,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    log::info!(
        "📌 PATCH /contests/{} - status: {:?} (by admin {})",
        id,
        body.status,
        admin.claims.email
    );

    match contest_service::update_status(&db, id, &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating contest status: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/contests/{id}",
    tag = "Contests",
    params(("id" = String, Path, description = "Contest ObjectId")),
    responses(
        (status = 200, description = "Delete result; deletedCount is 0 for unknown ids", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("token" = []))
)]
pub async fn delete_contest(user: AuthUser, db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    log::info!("🗑️  DELETE /contests/{} by {}", id, user.email());

    match contest_service::delete_contest(&db, id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error deleting contest: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/bestCreator",
    tag = "Contests",
    responses((status = 200, description = "Top 3 contests by attendance", body = [Contest]))
)]
pub async fn best_creators(db: web::Data<MongoDB>) -> HttpResponse {
    match contest_service::best_creators(&db).await {
        Ok(contests) => HttpResponse::Ok().json(contests),
        Err(e) => {
            log::error!("❌ Error fetching best creators: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/winners/advertise",
    tag = "Contests",
    responses((status = 200, description = "Up to 6 contests with a winner", body = [Contest]))
)]
pub async fn advertised_winners(db: web::Data<MongoDB>) -> HttpResponse {
    match contest_service::advertised_winners(&db).await {
        Ok(contests) => HttpResponse::Ok().json(contests),
        Err(e) => {
            log::error!("❌ Error fetching winners for advertisement: {}", e);
            e.error_response()
        }
    }
}
