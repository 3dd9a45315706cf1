pub mod admin;
pub mod auth;
pub mod request_metrics;

pub use admin::AdminUser;
pub use auth::AuthUser;
pub use request_metrics::RequestMetrics;
