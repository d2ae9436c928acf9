//! Client for the homework review status API

use std::sync::Arc;

use crate::error::FetchError;
use crate::io::HttpClient;

/// Decoded body of a review status response, returned verbatim
pub type FetchResponse = serde_json::Value;

/// Incremental fetch against the review status endpoint
pub struct ApiClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ApiClient {
    pub fn new(endpoint: &str, practicum_token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created ApiClient for {}", endpoint);

        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", practicum_token),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch review changes since `watermark` (Unix seconds)
    pub async fn fetch(&self, watermark: i64) -> Result<FetchResponse, FetchError> {
        let from_date = watermark.to_string();
        tracing::debug!("Requesting {} from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| FetchError::Transport {
                endpoint: self.endpoint.clone(),
                cause: e.to_string(),
            })?;

        if response.status != 200 {
            tracing::error!(
                "Review API {} returned status {}: {}",
                self.endpoint,
                response.status,
                response.body
            );
            return Err(FetchError::Status {
                endpoint: self.endpoint.clone(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode {
            endpoint: self.endpoint.clone(),
            cause: e.to_string(),
        })
    }
}
