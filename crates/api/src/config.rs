use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use vitacart_cloud::HostedConfig;
use vitacart_core::pricing::{
    PricingPolicy, DEFAULT_DISTRIBUTOR_THRESHOLD_CENTS, DEFAULT_MIN_ORDER_ITEMS,
};
use vitacart_db::DEFAULT_MAX_CONNECTIONS;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except the secrets and service URLs has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// How long browsers may cache a preflight response (default: `3600`).
    pub cors_max_age_secs: u64,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Access-token verification settings.
    pub jwt: JwtConfig,
    /// Hosted identity and storage endpoints.
    pub hosted: HostedConfig,
    /// Tier threshold and minimum order size.
    pub pricing: PricingPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                               | Default                 |
    /// |---------------------------------------|-------------------------|
    /// | `HOST`                                | `0.0.0.0`               |
    /// | `PORT`                                | `3000`                  |
    /// | `CORS_ORIGINS`                        | `http://localhost:5173` |
    /// | `CORS_MAX_AGE_SECS`                   | `3600`                  |
    /// | `REQUEST_TIMEOUT_SECS`                | `30`                    |
    /// | `DATABASE_URL`                        | required                |
    /// | `DATABASE_MAX_CONNECTIONS`            | `20`                    |
    /// | `PRICING_DISTRIBUTOR_THRESHOLD_CENTS` | `50000`                 |
    /// | `PRICING_MIN_ORDER_ITEMS`             | `6`                     |
    ///
    /// See [`JwtConfig::from_env`] and [`HostedConfig::from_env`] for the
    /// remaining variables.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a value does not parse.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        )
        .expect("CORS_ORIGINS must be a comma-separated list of valid origins");

        let cors_max_age_secs: u64 = std::env::var("CORS_MAX_AGE_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("CORS_MAX_AGE_SECS must be a valid u64");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let distributor_threshold_cents: i64 = std::env::var("PRICING_DISTRIBUTOR_THRESHOLD_CENTS")
            .unwrap_or_else(|_| DEFAULT_DISTRIBUTOR_THRESHOLD_CENTS.to_string())
            .parse()
            .expect("PRICING_DISTRIBUTOR_THRESHOLD_CENTS must be a valid i64");

        let min_order_items: i64 = std::env::var("PRICING_MIN_ORDER_ITEMS")
            .unwrap_or_else(|_| DEFAULT_MIN_ORDER_ITEMS.to_string())
            .parse()
            .expect("PRICING_MIN_ORDER_ITEMS must be a valid i64");

        assert!(
            distributor_threshold_cents >= 0 && min_order_items >= 0,
            "Pricing thresholds must not be negative"
        );

        Self {
            host,
            port,
            cors_origins,
            cors_max_age_secs,
            request_timeout_secs,
            database_url,
            database_max_connections,
            jwt: JwtConfig::from_env(),
            hosted: HostedConfig::from_env(),
            pricing: PricingPolicy {
                distributor_threshold_cents,
                min_order_items,
            },
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}
