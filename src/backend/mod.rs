//! Analytics backend client.
//!
//! The backend is an external collaborator reachable through three
//! JSON endpoints. The trait is the seam the enrichment sequence talks
//! to, so tests can swap in a double.

pub mod http;

pub use http::HttpBackend;

use crate::error::EnrichmentError;
use crate::models::{ChartsRequest, PredictRequest, RecommendationsRequest};
use async_trait::async_trait;
use serde_json::Value;

/// The three enrichment endpoints. Each returns the full response body.
#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    /// `POST /recommendations`
    async fn recommendations(&self, request: &RecommendationsRequest)
        -> Result<Value, EnrichmentError>;

    /// `POST /charts`
    async fn charts(&self, request: &ChartsRequest) -> Result<Value, EnrichmentError>;

    /// `POST /predict`
    async fn predict(&self, request: &PredictRequest) -> Result<Value, EnrichmentError>;
}
