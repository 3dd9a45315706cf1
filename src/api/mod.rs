pub mod contests;
pub mod health;
pub mod jwt;
pub mod metrics;
pub mod payments;
pub mod registrations;
pub mod swagger;
pub mod users;

use crate::utils::AppError;
use actix_web::web;
use mongodb::bson::oid::ObjectId;

/// Path identifiers must be 24-hex ObjectIds.
pub(crate) fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    crate::models::parse_object_id(raw).ok_or_else(|| {
        log::warn!("⚠️  Invalid id: {}", raw);
        AppError::InvalidRequest("Invalid id".to_string())
    })
}

/// Registers every ContestHub route. Static segments are registered before the
/// `{id}` resources they would otherwise collide with.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Auth
        .route("/jwt", web::post().to(jwt::issue_token))
        // Users
        .service(
            web::resource("/users")
                .route(web::get().to(users::list_users))
                .route(web::post().to(users::create_user)),
        )
        .service(
            web::resource("/users/{email}")
                .route(web::get().to(users::get_user))
                .route(web::put().to(users::update_role)),
        )
        // Contests
        .service(
            web::resource("/contests")
                .route(web::get().to(contests::list_contests))
                .route(web::post().to(contests::create_contest)),
        )
        .route("/contests/popular", web::get().to(contests::popular_contests))
        .route("/contests/attendance/{id}", web::put().to(contests::update_attendance))
        .route("/contests/winner/{id}", web::put().to(contests::update_winner))
        .service(
            web::resource("/contests/{id}")
                .route(web::get().to(contests::get_contest))
                .route(web::put().to(contests::update_contest))
                .route(web::patch().to(contests::update_status))
                .route(web::delete().to(contests::delete_contest)),
        )
        .route("/bestCreator", web::get().to(contests::best_creators))
        .route("/winners/advertise", web::get().to(contests::advertised_winners))
        // Payments
        .route("/create-payment-intent", web::post().to(payments::create_payment_intent))
        // Registrations
        .service(
            web::resource("/registrations")
                .route(web::get().to(registrations::list_registrations))
                .route(web::post().to(registrations::create_registration)),
        )
        .service(
            web::resource("/registrations/{key}")
                .route(web::get().to(registrations::registrations_by_creator))
                .route(web::put().to(registrations::update_registration_status)),
        )
        .route("/payments/{email}", web::get().to(registrations::payments_by_email));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MongoDB;
    use crate::middleware::RequestMetrics;
    use crate::services::payment_service::PaymentIntent;
    use crate::services::{JwtService, PaymentGateway};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    const SECRET: &str = "test-secret";

    #[derive(Default)]
    struct RecordingGateway {
        amounts: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, AppError> {
            self.amounts.lock().unwrap().push(amount);
            Ok(PaymentIntent {
                id: "pi_test".to_string(),
                client_secret: format!("pi_test_secret_{}", amount),
                amount,
                currency: currency.to_string(),
            })
        }
    }

    fn jwt() -> JwtService {
        JwtService::new(SECRET, chrono::Duration::days(100))
    }

    /// A database handle that is never contacted: these tests only cover
    /// paths that are answered before any query runs.
    async fn offline_db() -> web::Data<MongoDB> {
        let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        web::Data::new(MongoDB::from_client(client, "ContestHubDB_test"))
    }

    macro_rules! test_app {
        () => {
            test_app!(Arc::new(RecordingGateway::default()) as Arc<dyn PaymentGateway>)
        };
        ($gateway:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(jwt()))
                    .app_data(offline_db().await)
                    .app_data(web::Data::from($gateway))
                    .wrap(RequestMetrics)
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_root_banner() {
        let app = test_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "ContestHub is running here!");
    }

    #[actix_web::test]
    async fn test_issued_token_verifies() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/jwt")
            .set_json(serde_json::json!({ "email": "creator@contesthub.app" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let token = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        let claims = jwt().verify(&token).unwrap();
        assert_eq!(claims.email, "creator@contesthub.app");
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/contests")
            .set_json(serde_json::json!({ "contestName": "Logo Sprint" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "message": "unauthorized access" }));
    }

    #[actix_web::test]
    async fn test_token_from_other_secret_is_unauthorized() {
        let app = test_app!();
        let foreign = JwtService::new("other-secret", chrono::Duration::days(1))
            .issue("a@b.c")
            .unwrap();
        let req = test::TestRequest::put()
            .uri(&format!("/contests/winner/{}", ObjectId::new().to_hex()))
            .insert_header(("Authorization", foreign))
            .set_json(serde_json::json!({ "winnerName": "Ana" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bearer_prefixed_token_is_unauthorized() {
        let app = test_app!();
        let token = jwt().issue("a@b.c").unwrap();
        let req = test::TestRequest::delete()
            .uri(&format!("/contests/{}", ObjectId::new().to_hex()))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_admin_routes_require_token() {
        let app = test_app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::patch()
            .uri(&format!("/contests/{}", ObjectId::new().to_hex()))
            .set_json(serde_json::json!({ "status": "Accepted" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::put()
            .uri("/users/someone@mail.com")
            .set_json(serde_json::json!({ "role": "admin" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_bad_request() {
        let app = test_app!();
        let token = jwt().issue("a@b.c").unwrap();
        let req = test::TestRequest::delete()
            .uri("/contests/not-an-object-id")
            .insert_header(("Authorization", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid id");

        let req = test::TestRequest::put()
            .uri("/contests/attendance/123")
            .set_json(serde_json::json!({ "attendance": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_invalid_sort_order_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/contests?sortOrder=sideways")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_payment_intent_uses_cents() {
        let gateway = Arc::new(RecordingGateway::default());
        let app = test_app!(gateway.clone() as Arc<dyn PaymentGateway>);

        let req = test::TestRequest::post()
            .uri("/create-payment-intent")
            .set_json(serde_json::json!({ "price": 25 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "clientSecret": "pi_test_secret_2500" }));
        assert_eq!(*gateway.amounts.lock().unwrap(), vec![2500]);
    }

    #[actix_web::test]
    async fn test_payment_intent_accepts_string_price() {
        let gateway = Arc::new(RecordingGateway::default());
        let app = test_app!(gateway.clone() as Arc<dyn PaymentGateway>);

        let req = test::TestRequest::post()
            .uri("/create-payment-intent")
            .set_json(serde_json::json!({ "price": "12.5" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(*gateway.amounts.lock().unwrap(), vec![1250]);

        let req = test::TestRequest::post()
            .uri("/create-payment-intent")
            .set_json(serde_json::json!({ "price": "free" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_metrics_count_requests() {
        let app = test_app!();
        test::call_service(&app, test::TestRequest::get().uri("/contests/attendance/x").to_request()).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(text.contains("http_requests_total"));
        assert!(text.contains("http_errors_total"));
    }
}
