use crate::api::parse_id;
use crate::database::MongoDB;
use crate::models::{Registration, RegistrationListQuery, RegistrationStatusRequest, UpdateResponse};
use crate::services::registration_service;
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    get,
    path = "/registrations",
    tag = "Registrations",
    params(RegistrationListQuery),
    responses((status = 200, description = "Matching registrations", body = [Registration]))
)]
pub async fn list_registrations(
    db: web::Data<MongoDB>,
    query: web::Query<RegistrationListQuery>,
) -> HttpResponse {
    log::info!("📋 GET /registrations - {:?}", query);

    match registration_service::list_registrations(&db, &query).await {
        Ok(registrations) => HttpResponse::Ok().json(registrations),
        Err(e) => {
            log::error!("❌ Error fetching registrations: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/registrations/{email}",
    tag = "Registrations",
    params(("email" = String, Path, description = "Contest creator email")),
    responses((status = 200, description = "Registrations for the creator's contests", body = [Registration]))
)]
pub async fn registrations_by_creator(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("📋 GET /registrations/{}", email);

    match registration_service::by_creator(&db, &email).await {
        Ok(registrations) => HttpResponse::Ok().json(registrations),
        Err(e) => {
            log::error!("❌ Error fetching registrations: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/registrations",
    tag = "Registrations",
    request_body = Registration,
    responses((status = 200, description = "The stored registration", body = Registration))
)]
pub async fn create_registration(db: web::Data<MongoDB>, body: web::Json<Registration>) -> HttpResponse {
    let registration = body.into_inner();
    log::info!(
        "🎟️  POST /registrations - {:?} for contest {:?} (tx {:?})",
        registration.email,
        registration.contest_id,
        registration.transaction_id
    );

    match registration_service::create_registration(&db, registration).await {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(e) => {
            log::error!("❌ Error creating registration: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/registrations/{id}",
    tag = "Registrations",
    params(("id" = String, Path, description = "Registration ObjectId")),
    request_body = RegistrationStatusRequest,
    responses((status = 200, description = "Update result (upsert)", body = UpdateResponse))
)]
pub async fn update_registration_status(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<RegistrationStatusRequest>,
) -> HttpResponse {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    log::info!("🏅 PUT /registrations/{} - status: {:?}", id, body.winner);

    match registration_service::update_status(&db, id, &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating registration status: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/payments/{email}",
    tag = "Registrations",
    params(("email" = String, Path, description = "Participant email")),
    responses((status = 200, description = "Registrations paid by the participant", body = [Registration]))
)]
pub async fn payments_by_email(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("💳 GET /payments/{}", email);

    match registration_service::by_participant(&db, &email).await {
        Ok(registrations) => HttpResponse::Ok().json(registrations),
        Err(e) => {
            log::error!("❌ Error fetching payments: {}", e);
            e.error_response()
        }
    }
}
