use crate::utils::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CURRENCY: &str = "usd";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    #[serde(deserialize_with = "crate::models::deserialize_lenient_f64")]
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

/// Converts a price to the smallest currency unit, truncating like the
/// frontend's integer parse does (19.99 becomes 1998 because of float rounding).
pub fn price_to_cents(price: f64) -> i64 {
    (price * 100.0).trunc() as i64
}

/// Card payment processor. The amount is trusted as sent by the client.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, AppError>;
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: Option<String>,
}

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(secret_key: &str, api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Form-encoded body of `POST /v1/payment_intents`.
    pub fn payment_intent_form(amount: i64, currency: &str) -> String {
        [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ]
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, AppError> {
        log::info!("💳 Creating payment intent: {} {}", amount, currency);

        let url = format!("{}/v1/payment_intents", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Self::payment_intent_form(amount, currency))
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to reach Stripe: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(AppError::PaymentError(format!("Stripe API error {}: {}", status, message)));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to parse payment intent: {}", e)))?;

        log::info!("✅ Payment intent created: {} ({} {})", intent.id, intent.amount, intent.currency);
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_to_cents() {
        assert_eq!(price_to_cents(25.0), 2500);
        assert_eq!(price_to_cents(0.5), 50);
        assert_eq!(price_to_cents(19.99), 1998);
    }

    #[test]
    fn test_payment_intent_form() {
        assert_eq!(
            StripeGateway::payment_intent_form(2500, CURRENCY),
            "amount=2500&currency=usd&payment_method_types%5B%5D=card"
        );
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let gateway = StripeGateway::new("sk_test_123", "https://api.stripe.com/");
        assert_eq!(gateway.api_base, "https://api.stripe.com");
    }

    #[tokio::test]
    async fn test_unreachable_processor_is_payment_error() {
        let gateway = StripeGateway::new("sk_test_123", "http://127.0.0.1:1");
        let result = gateway.create_payment_intent(100, CURRENCY).await;
        assert!(matches!(result, Err(AppError::PaymentError(_))));
    }
}
