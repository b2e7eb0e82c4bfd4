//! Enrichment tasks and their per-call outcome.

use crate::error::EnrichmentError;
use crate::models::{AnalysisRecord, ChartsRequest, PredictRequest, RecommendationsRequest};
use serde_json::Value;
use std::fmt;

/// One best-effort call that fills one optional field of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrichmentTask {
    Recommendations,
    Charts,
    Predictions,
}

impl EnrichmentTask {
    /// Issue order. Calls never overlap.
    pub const ORDER: [EnrichmentTask; 3] = [
        EnrichmentTask::Recommendations,
        EnrichmentTask::Charts,
        EnrichmentTask::Predictions,
    ];

    /// Pull the consumed part out of a success body.
    ///
    /// Recommendations and charts come from a field of the same name; a
    /// prediction is the whole body. A missing or null field is an error.
    pub fn extract(self, body: Value) -> Result<Value, EnrichmentError> {
        let field = match self {
            EnrichmentTask::Recommendations => "recommendations",
            EnrichmentTask::Charts => "charts",
            EnrichmentTask::Predictions => return Ok(body),
        };

        match body {
            Value::Object(mut map) => map
                .remove(field)
                .filter(|v| !v.is_null())
                .ok_or(EnrichmentError::MissingField(field)),
            _ => Err(EnrichmentError::MissingField(field)),
        }
    }

    /// Store `value` in the field this task owns.
    pub fn merge_into(self, record: &mut AnalysisRecord, value: Value) {
        let slot = match self {
            EnrichmentTask::Recommendations => &mut record.recommendations,
            EnrichmentTask::Charts => &mut record.charts,
            EnrichmentTask::Predictions => &mut record.predictions,
        };
        *slot = Some(value);
    }
}

impl fmt::Display for EnrichmentTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentTask::Recommendations => write!(f, "Recommendations"),
            EnrichmentTask::Charts => write!(f, "Charts"),
            EnrichmentTask::Predictions => write!(f, "Predictions"),
        }
    }
}

/// Terminal state of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Data merged into the record.
    Success,
    /// Logged and skipped; the field stays absent.
    Failed(String),
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success)
    }
}

pub(crate) fn recommendations_request(record: &AnalysisRecord) -> RecommendationsRequest {
    RecommendationsRequest {
        kpis: record.kpis.clone(),
        profile: record.profile.clone(),
    }
}

pub(crate) fn charts_request(record: &AnalysisRecord, chart_types: &[String]) -> ChartsRequest {
    ChartsRequest {
        filename: record.filename.clone(),
        chart_types: chart_types.to_vec(),
    }
}

pub(crate) fn predict_request(record: &AnalysisRecord) -> PredictRequest {
    PredictRequest {
        filename: record.filename.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_named_field() {
        let body = json!({"recommendations": ["a"], "status": "ok"});
        assert_eq!(
            EnrichmentTask::Recommendations.extract(body).unwrap(),
            json!(["a"])
        );
    }

    #[test]
    fn test_extract_prediction_keeps_whole_body() {
        let body = json!({"trend": "up", "confidence": 0.8});
        assert_eq!(
            EnrichmentTask::Predictions.extract(body.clone()).unwrap(),
            body
        );
    }

    #[test]
    fn test_extract_missing_field() {
        let err = EnrichmentTask::Charts.extract(json!({"error": "x"})).unwrap_err();
        assert!(matches!(err, EnrichmentError::MissingField("charts")));

        let err = EnrichmentTask::Charts.extract(json!([1, 2])).unwrap_err();
        assert!(matches!(err, EnrichmentError::MissingField("charts")));
    }

    #[test]
    fn test_merge_touches_only_owned_field() {
        let mut record = AnalysisRecord::new("Acme", "Retail", "q1.csv");
        EnrichmentTask::Charts.merge_into(&mut record, json!({"forecast": 1}));

        assert_eq!(record.charts, Some(json!({"forecast": 1})));
        assert!(record.recommendations.is_none());
        assert!(record.predictions.is_none());
        assert_eq!(record.company_name, "Acme");
    }

    #[test]
    fn test_order_is_fixed() {
        assert_eq!(
            EnrichmentTask::ORDER,
            [
                EnrichmentTask::Recommendations,
                EnrichmentTask::Charts,
                EnrichmentTask::Predictions
            ]
        );
    }
}
