//! Data models for the analysis flow.
//!
//! This module contains the analysis record that travels between the
//! intake, enrichment and dashboard stages, plus the request bodies sent
//! to the analytics backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Chart categories requested from the backend by default.
pub const DEFAULT_CHART_TYPES: [&str; 4] = [
    "revenue_trend",
    "product_comparison",
    "expense_breakdown",
    "forecast",
];

/// The record carrying user-submitted metadata plus optional
/// server-derived enrichment fields.
///
/// Serialized with the camelCase keys the pages have always used.
/// `file_name` (`fileName`) is the name of the uploaded CSV, while
/// `filename` is the identifier the backend assigned to the uploaded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Company name entered at intake.
    pub company_name: String,
    /// Industry entered at intake.
    pub industry: String,
    /// Original name of the uploaded CSV file.
    pub file_name: String,
    /// Human-readable date of the intake (e.g. `19 October 2026`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,

    /// Server-side identifier of the uploaded data.
    #[serde(
        default,
        rename = "filename",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename: Option<String>,
    /// Precomputed KPIs, opaque to this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Value>,
    /// Precomputed business profile, opaque to this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Value>,

    /// Keys written by other stages that this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisRecord {
    /// Creates a record with only the intake fields set.
    pub fn new(
        company_name: impl Into<String>,
        industry: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            industry: industry.into(),
            file_name: file_name.into(),
            analysis_date: None,
            filename: None,
            kpis: None,
            profile: None,
            recommendations: None,
            charts: None,
            predictions: None,
            extra: Map::new(),
        }
    }

    /// Number of enrichment fields currently present.
    pub fn enrichment_count(&self) -> usize {
        [&self.recommendations, &self.charts, &self.predictions]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}

/// Body of `POST /recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
}

/// Body of `POST /charts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub chart_types: Vec<String>,
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Page the flow moves to after a stage finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Back to the landing page (no usable record).
    Entry,
    /// On to the loading page, where enrichment runs.
    Loading,
    /// On to the dashboard.
    Dashboard,
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Entry => write!(f, "entry"),
            Navigation::Loading => write!(f, "loading"),
            Navigation::Dashboard => write!(f, "dashboard"),
        }
    }
}
