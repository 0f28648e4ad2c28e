//! Hosted identity client used for the auth pass-through endpoints.
//!
//! The API never stores credentials. Sign-up, sign-in, refresh, and sign-out
//! are forwarded verbatim; the access tokens issued here are the bearer
//! tokens the API later verifies locally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::HostedConfig;
use crate::error::{ensure_success, CloudError};

/// A session issued by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    #[serde(default)]
    pub user: serde_json::Value,
}

/// Identity operations forwarded to the hosted service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account. Depending on project settings the response
    /// is either a session or a user awaiting email confirmation, so it is
    /// passed through as raw JSON.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<serde_json::Value, CloudError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CloudError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, CloudError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), CloudError>;
}

/// [`IdentityProvider`] backed by the hosted auth REST API.
pub struct HostedIdentity {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl HostedIdentity {
    pub fn new(config: &HostedConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an identity client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &HostedConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn auth_url(&self, suffix: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, suffix)
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<AuthSession, CloudError> {
        let response = self
            .client
            .post(self.auth_url("/token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentity {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<serde_json::Value, CloudError> {
        let body = signup_body(email, password, full_name);
        let response = self
            .client
            .post(self.auth_url("/signup"))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CloudError> {
        self.token_grant(
            "password",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, CloudError> {
        self.token_grant(
            "refresh_token",
            serde_json::json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), CloudError> {
        let response = self
            .client
            .post(self.auth_url("/logout"))
            .bearer_auth(access_token)
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

/// Sign-up payload; the display name travels as user metadata.
fn signup_body(email: &str, password: &str, full_name: Option<&str>) -> serde_json::Value {
    match full_name {
        Some(name) => serde_json::json!({
            "email": email,
            "password": password,
            "data": { "full_name": name },
        }),
        None => serde_json::json!({ "email": email, "password": password }),
    }
}
