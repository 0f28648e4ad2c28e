//! Access-token verification.
//!
//! The hosted identity service signs access tokens with HS256 using the
//! project's JWT secret. The API verifies them locally (signature, `exp`,
//! and `aud`) so protected routes never round-trip to the identity service.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use vitacart_core::types::UserId;

/// Audience claim carried by tokens issued to signed-in users.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// JWT claims the API relies on. Unknown claims are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the identity service's user id.
    pub sub: UserId,
    #[serde(default)]
    pub email: Option<String>,
    /// Identity-service role (`authenticated`), not the shop role.
    #[serde(default)]
    pub role: Option<String>,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for access-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
    /// Required `aud` claim.
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var             | Required | Default         |
    /// |---------------------|----------|-----------------|
    /// | `AUTH_JWT_SECRET`   | **yes**  | --              |
    /// | `AUTH_JWT_AUDIENCE` | no       | `authenticated` |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let audience =
            std::env::var("AUTH_JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self { secret, audience }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiration, and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign a token the same way the identity service does.
///
/// The server never issues tokens itself; this exists for local tooling and
/// integration tests.
pub fn generate_access_token(
    user_id: UserId,
    email: &str,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        aud: config.audience.clone(),
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = generate_access_token(user_id, "ada@example.com", 3600, &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well beyond the default 60-second leeway.
        let token = generate_access_token(Uuid::new_v4(), "a@b.co", -300, &config)
            .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let issuer = JwtConfig {
            audience: "anon".to_string(),
            ..test_config()
        };
        let token = generate_access_token(Uuid::new_v4(), "a@b.co", 3600, &issuer)
            .expect("encoding should succeed");

        assert!(validate_token(&token, &test_config()).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };
        let token = generate_access_token(Uuid::new_v4(), "a@b.co", 3600, &test_config())
            .expect("token generation should succeed");

        assert!(
            validate_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_missing_optional_claims_are_accepted() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({
                "sub": Uuid::nil(),
                "aud": DEFAULT_AUDIENCE,
                "exp": now + 60,
                "iat": now,
            }),
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let claims = validate_token(&token, &config).expect("minimal claims should validate");
        assert!(claims.email.is_none());
        assert!(claims.role.is_none());
    }
}
