//! Shared helpers for API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) over a
//! test database, with the hosted identity and storage services replaced by
//! in-memory fakes.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;
use vitacart_api::auth::jwt::{generate_access_token, JwtConfig, DEFAULT_AUDIENCE};
use vitacart_api::config::ServerConfig;
use vitacart_api::router::build_app_router;
use vitacart_api::state::AppState;
use vitacart_cloud::{
    AuthSession, CloudError, HostedConfig, IdentityProvider, ObjectStorage, SignedUpload,
};
use vitacart_core::pricing::PricingPolicy;

/// Distributor threshold used by every test app (100.00).
pub const TEST_THRESHOLD_CENTS: i64 = 10_000;

/// Minimum order size used by every test app.
pub const TEST_MIN_ORDER_ITEMS: i64 = 6;

/// The one origin the test app allows.
pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Password the fake identity service accepts.
pub const GOOD_PASSWORD: &str = "correct-horse";

/// Email the fake identity service reports as already registered.
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// User id of every session the fake identity service issues.
pub const FAKE_USER_ID: Uuid = Uuid::from_u128(0x0c0ffee0_0000_4000_8000_000000000001);

/// Refresh token the fake identity service accepts.
pub const GOOD_REFRESH_TOKEN: &str = "good-refresh-token";

const STORAGE_BASE: &str = "https://storage.test/object/public/product-images";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static(TEST_ORIGIN)],
        cors_max_age_secs: 600,
        request_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        },
        hosted: HostedConfig {
            base_url: "https://hosted.test".to_string(),
            anon_key: "anon".to_string(),
            service_key: "service".to_string(),
            storage_bucket: "product-images".to_string(),
        },
        pricing: PricingPolicy {
            distributor_threshold_cents: TEST_THRESHOLD_CENTS,
            min_order_items: TEST_MIN_ORDER_ITEMS,
        },
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Object storage that records removals instead of calling out.
#[derive(Default)]
pub struct FakeStorage {
    pub removed: Mutex<Vec<String>>,
    /// When set, `remove` fails with a 503.
    pub fail_removals: bool,
}

impl FakeStorage {
    pub fn removed_paths(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn create_signed_upload_url(&self, path: &str) -> Result<SignedUpload, CloudError> {
        Ok(SignedUpload {
            path: path.to_string(),
            signed_url: format!("https://storage.test/upload/{path}?token=tok"),
            token: "tok".to_string(),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{STORAGE_BASE}/{path}")
    }

    async fn remove(&self, paths: &[String]) -> Result<(), CloudError> {
        if self.fail_removals {
            return Err(CloudError::Api {
                status: 503,
                body: "unavailable".into(),
            });
        }
        self.removed.lock().unwrap().extend_from_slice(paths);
        Ok(())
    }
}

/// Identity service with one fixed user.
pub struct FakeIdentity;

fn fake_session(email: &str) -> AuthSession {
    AuthSession {
        access_token: "fake-access-token".to_string(),
        token_type: "bearer".to_string(),
        expires_in: 3600,
        refresh_token: "next-refresh-token".to_string(),
        user: serde_json::json!({ "id": FAKE_USER_ID.to_string(), "email": email }),
    }
}

fn rejected(status: u16, msg: &str) -> CloudError {
    CloudError::Api {
        status,
        body: serde_json::json!({ "msg": msg }).to_string(),
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        full_name: Option<&str>,
    ) -> Result<serde_json::Value, CloudError> {
        if email == TAKEN_EMAIL {
            return Err(rejected(422, "User already registered"));
        }
        Ok(serde_json::json!({
            "id": FAKE_USER_ID.to_string(),
            "email": email,
            "user_metadata": { "full_name": full_name },
        }))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CloudError> {
        if password != GOOD_PASSWORD {
            return Err(rejected(400, "Invalid login credentials"));
        }
        Ok(fake_session(email))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, CloudError> {
        if refresh_token != GOOD_REFRESH_TOKEN {
            return Err(rejected(400, "Invalid Refresh Token"));
        }
        Ok(fake_session("refreshed@example.com"))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), CloudError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build the full application router over `pool` with fresh fakes.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_storage(pool, Arc::new(FakeStorage::default()))
}

/// Build the application router sharing `storage` with the caller.
pub fn build_test_app_with_storage(pool: PgPool, storage: Arc<FakeStorage>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        identity: Arc::new(FakeIdentity),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and seed data
// ---------------------------------------------------------------------------

/// Sign a valid access token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    generate_access_token(user_id, "user@example.com", 3600, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Insert a profile with `role` and return its id and an access token.
pub async fn create_user(pool: &PgPool, role: &str) -> (Uuid, String) {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO profiles (id, email, role) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("{id}@example.com"))
        .bind(role)
        .execute(pool)
        .await
        .expect("profile insert should succeed");
    (id, token_for(id))
}

pub async fn create_admin(pool: &PgPool) -> (Uuid, String) {
    create_user(pool, "admin").await
}

pub async fn create_customer(pool: &PgPool) -> (Uuid, String) {
    create_user(pool, "customer").await
}

pub async fn seed_category(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name, slug) VALUES ($1, $1) RETURNING id")
        .bind(slug)
        .fetch_one(pool)
        .await
        .expect("category insert should succeed")
}

/// Insert a product with prices, stock, and an optional category.
pub async fn seed_product(
    pool: &PgPool,
    slug: &str,
    price_cents: i64,
    distributor_price_cents: i64,
    stock: i32,
    category_id: Option<i64>,
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (category_id, name, slug, price_cents, distributor_price_cents) \
         VALUES ($1, $2, $2, $3, $4) RETURNING id",
    )
    .bind(category_id)
    .bind(slug)
    .bind(price_cents)
    .bind(distributor_price_cents)
    .fetch_one(pool)
    .await
    .expect("product insert should succeed");

    sqlx::query("INSERT INTO inventory (product_id, quantity) VALUES ($1, $2)")
        .bind(id)
        .bind(stock)
        .execute(pool)
        .await
        .expect("inventory insert should succeed");
    id
}

pub async fn deactivate_product(pool: &PgPool, product_id: i64) {
    sqlx::query("UPDATE products SET is_active = false WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await
        .expect("product update should succeed");
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
