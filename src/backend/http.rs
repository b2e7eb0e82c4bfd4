//! reqwest implementation of the analytics backend.

use super::AnalyticsBackend;
use crate::error::EnrichmentError;
use crate::models::{ChartsRequest, PredictRequest, RecommendationsRequest};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the analytics backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for `base_url`.
    ///
    /// Without `timeout` requests wait as long as the transport allows.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, EnrichmentError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(base_url, builder.build()?))
    }

    /// Wrap an already configured client.
    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        info!("Analytics backend: {}", base_url);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, EnrichmentError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Status { status, body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| EnrichmentError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AnalyticsBackend for HttpBackend {
    async fn recommendations(
        &self,
        request: &RecommendationsRequest,
    ) -> Result<Value, EnrichmentError> {
        self.post_json("/recommendations", request).await
    }

    async fn charts(&self, request: &ChartsRequest) -> Result<Value, EnrichmentError> {
        self.post_json("/charts", request).await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<Value, EnrichmentError> {
        self.post_json("/predict", request).await
    }
}
