/// Connection settings shared by the hosted identity and storage clients.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    /// Project base URL, e.g. `https://abc.example.co` (no trailing slash).
    pub base_url: String,
    /// Public key used for end-user auth calls.
    pub anon_key: String,
    /// Privileged key used for storage administration.
    pub service_key: String,
    /// Bucket that holds product images.
    pub storage_bucket: String,
}

/// Default bucket for product images.
pub const DEFAULT_STORAGE_BUCKET: &str = "product-images";

impl HostedConfig {
    /// Load hosted-service configuration from environment variables.
    ///
    /// | Env Var              | Required | Default          |
    /// |----------------------|----------|------------------|
    /// | `HOSTED_URL`         | **yes**  | --               |
    /// | `HOSTED_ANON_KEY`    | **yes**  | --               |
    /// | `HOSTED_SERVICE_KEY` | **yes**  | --               |
    /// | `STORAGE_BUCKET`     | no       | `product-images` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let base_url = std::env::var("HOSTED_URL").expect("HOSTED_URL must be set");
        let anon_key = std::env::var("HOSTED_ANON_KEY").expect("HOSTED_ANON_KEY must be set");
        let service_key =
            std::env::var("HOSTED_SERVICE_KEY").expect("HOSTED_SERVICE_KEY must be set");
        let storage_bucket =
            std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_STORAGE_BUCKET.into());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            service_key,
            storage_bucket,
        }
    }
}
