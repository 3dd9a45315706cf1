use crate::services::payment_service::{self, PaymentIntentRequest, PaymentIntentResponse, CURRENCY};
use crate::services::PaymentGateway;
use actix_web::{web, HttpResponse, ResponseError};

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the card payment", body = PaymentIntentResponse),
        (status = 500, description = "Payment processor rejected the request")
    )
)]
pub async fn create_payment_intent(
    gateway: web::Data<dyn PaymentGateway>,
    body: web::Json<PaymentIntentRequest>,
) -> HttpResponse {
    let amount = payment_service::price_to_cents(body.price);
    log::info!("💳 POST /create-payment-intent - price: {} ({} cents)", body.price, amount);

    match gateway.create_payment_intent(amount, CURRENCY).await {
        Ok(intent) => HttpResponse::Ok().json(PaymentIntentResponse {
            client_secret: intent.client_secret,
        }),
        Err(e) => {
            log::error!("❌ Error creating payment intent: {}", e);
            e.error_response()
        }
    }
}
