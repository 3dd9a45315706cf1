use crate::utils::AppError;
use std::env;

const DEFAULT_CLUSTER: &str = "cluster0.op9dmu8.mongodb.net";
const DEFAULT_DB_NAME: &str = "ContestHubDB";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_TOKEN_TTL_DAYS: i64 = 100;

/// Runtime configuration, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub access_token_secret: String,
    pub token_ttl_days: i64,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::ConfigError(format!("{} must be set", key)))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::ConfigError(format!("PORT is not a valid port: {}", raw)))?,
            None => 5000,
        };

        let token_ttl_days = match get("TOKEN_TTL_DAYS") {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                AppError::ConfigError(format!("TOKEN_TTL_DAYS is not a number: {}", raw))
            })?,
            None => DEFAULT_TOKEN_TTL_DAYS,
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => atlas_uri(
                &require("DB_USER")?,
                &require("DB_PASS")?,
                &get("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
            ),
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            database_name: get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            access_token_secret: require("ACCESS_TOKEN_SECRET")?,
            token_ttl_days,
            stripe_secret_key: require("STRIPE_SECRET_KEY")?,
            stripe_api_base: get("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            cors_origins,
        })
    }

    /// Connection string with the password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        match (self.database_url.find("://"), self.database_url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => format!(
                "{}://***@{}",
                &self.database_url[..scheme_end],
                &self.database_url[at + 1..]
            ),
            _ => self.database_url.clone(),
        }
    }
}

fn atlas_uri(user: &str, password: &str, cluster: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
        urlencoding::encode(user),
        urlencoding::encode(password),
        cluster
    )
}
