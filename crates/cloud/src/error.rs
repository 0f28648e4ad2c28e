/// Errors from the hosted-service clients.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Hosted service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the payload was not what we expected.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl CloudError {
    /// `true` when the service rejected the request itself (4xx), as opposed
    /// to failing to process it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or [`CloudError::Api`] with the status and body.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, CloudError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(CloudError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
