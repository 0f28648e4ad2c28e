//! Object storage client for product images.
//!
//! Uploads never pass through the API server: an admin asks for a signed
//! upload URL, the browser `PUT`s the file straight to storage, and the API
//! then records the object's path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::HostedConfig;
use crate::error::{ensure_success, CloudError};

/// A one-time upload target for a single object path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedUpload {
    /// Object path inside the bucket.
    pub path: String,
    /// Absolute URL the client uploads to.
    pub signed_url: String,
    /// Upload token embedded in `signed_url`.
    pub token: String,
}

/// Object storage operations the API server needs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Create a signed URL that allows one upload to `path`.
    async fn create_signed_upload_url(&self, path: &str) -> Result<SignedUpload, CloudError>;

    /// Public (CDN) URL for an object.
    fn public_url(&self, path: &str) -> String;

    /// Delete objects by path. Missing objects are not an error.
    async fn remove(&self, paths: &[String]) -> Result<(), CloudError>;
}

/// Response body of the sign-upload endpoint.
#[derive(Debug, Deserialize)]
struct SignUploadResponse {
    /// Path relative to `/storage/v1`, including the `token` query parameter.
    url: String,
}

/// [`ObjectStorage`] backed by the hosted storage REST API.
pub struct HostedStorage {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl HostedStorage {
    pub fn new(config: &HostedConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a storage client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &HostedConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
            bucket: config.storage_bucket.clone(),
        }
    }

    fn storage_url(&self, suffix: &str) -> String {
        format!("{}/storage/v1{}", self.base_url, suffix)
    }
}

#[async_trait]
impl ObjectStorage for HostedStorage {
    async fn create_signed_upload_url(&self, path: &str) -> Result<SignedUpload, CloudError> {
        let response = self
            .client
            .post(self.storage_url(&format!("/object/upload/sign/{}/{}", self.bucket, path)))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let body: SignUploadResponse = ensure_success(response).await?.json().await?;
        let signed_url = self.storage_url(&body.url);
        let token = upload_token(&signed_url)?;

        tracing::debug!(bucket = %self.bucket, path, "Created signed upload URL");

        Ok(SignedUpload {
            path: path.to_string(),
            signed_url,
            token,
        })
    }

    fn public_url(&self, path: &str) -> String {
        self.storage_url(&format!("/object/public/{}/{}", self.bucket, path))
    }

    async fn remove(&self, paths: &[String]) -> Result<(), CloudError> {
        if paths.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .delete(self.storage_url(&format!("/object/{}", self.bucket)))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;

        ensure_success(response).await?;
        tracing::debug!(bucket = %self.bucket, count = paths.len(), "Removed storage objects");
        Ok(())
    }
}

/// Extract the `token` query parameter from a signed upload URL.
fn upload_token(signed_url: &str) -> Result<String, CloudError> {
    let url = reqwest::Url::parse(signed_url)
        .map_err(|e| CloudError::InvalidResponse(format!("invalid signed URL: {e}")))?;
    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| CloudError::InvalidResponse("signed URL has no token".into()))
}

/// Folder that holds every image object of one product.
pub fn product_image_prefix(product_id: i64) -> String {
    format!("products/{product_id}/")
}

/// Build the object path for a new product image.
pub fn product_image_path(product_id: i64, object_name: &str, extension: &str) -> String {
    format!("{}{object_name}.{extension}", product_image_prefix(product_id))
}
