pub mod contest_query;
pub mod contest_service;
pub mod payment_service;
pub mod registration_service;
pub mod token_service;
pub mod user_service;

pub use payment_service::{PaymentGateway, StripeGateway};
pub use token_service::JwtService;
