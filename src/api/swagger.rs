use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ContestHub API",
        version = "1.0.0",
        description = "Backend for ContestHub: users, contests, registrations and payments.\n\n**Authentication:** protected endpoints read the token from `POST /jwt` verbatim from the `Authorization` header (no `Bearer` prefix). Admin endpoints additionally require the caller's user record to have role `admin`."
    ),
    paths(
        // Auth
        crate::api::jwt::issue_token,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_role,

        // Contests
        crate::api::contests::list_contests,
        crate::api::contests::popular_contests,
        crate::api::contests::get_contest,
        crate::api::contests::create_contest,
        crate::api::contests::update_contest,
        crate::api::contests::update_attendance,
        crate::api::contests::update_winner,
        crate::api::contests::update_status,
        crate::api::contests::delete_contest,
        crate::api::contests::best_creators,
        crate::api::contests::advertised_winners,

        // Registrations & payments
        crate::api::registrations::list_registrations,
        crate::api::registrations::registrations_by_creator,
        crate::api::registrations::create_registration,
        crate::api::registrations::update_registration_status,
        crate::api::registrations::payments_by_email,
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::models::TokenRequest,
            crate::models::User,
            crate::models::UpdateRoleRequest,
            crate::models::ExistingUserResponse,
            crate::models::Contest,
            crate::models::ContestUpdate,
            crate::models::AttendanceUpdate,
            crate::models::WinnerUpdate,
            crate::models::StatusUpdate,
            crate::models::Registration,
            crate::models::RegistrationStatusRequest,
            crate::models::UpdateResponse,
            crate::models::DeleteResponse,
            crate::services::payment_service::PaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Token issuance."),
        (name = "Health", description = "Health check and request counters."),
        (name = "Users", description = "Sign-up, profile lookup and role management."),
        (name = "Contests", description = "Contest publishing, approval, listing and winners."),
        (name = "Registrations", description = "Contest entries and the participant's payment history."),
        (name = "Payments", description = "Stripe payment intents."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Raw JWT from POST /jwt",
                ))),
            );
        }
    }
}
