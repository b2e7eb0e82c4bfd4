//! Data aggregation sequence.
//!
//! Reads the stored analysis record, enriches it with recommendations,
//! charts and predictions from the analytics backend, writes it back and
//! hands off to the dashboard. Calls run strictly one after another and
//! each one is best-effort: a failed call is logged and its field stays
//! absent.

pub mod task;

pub use task::{CallOutcome, EnrichmentTask};

use task::{charts_request, predict_request, recommendations_request};

use crate::backend::AnalyticsBackend;
use crate::error::{EnrichmentError, StoreError};
use crate::models::{AnalysisRecord, Navigation, DEFAULT_CHART_TYPES};
use crate::store::{load_record, save_record, KeyValueStore};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What a finished run did.
#[derive(Debug, Clone)]
pub struct AggregationReport {
    /// Where the flow goes next.
    pub navigation: Navigation,
    /// Outcome of every call that was issued, in issue order.
    pub outcomes: Vec<(EnrichmentTask, CallOutcome)>,
    /// The record as persisted, or `None` when no record was found.
    pub record: Option<AnalysisRecord>,
}

impl AggregationReport {
    /// Number of calls that merged data into the record.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_success())
            .count()
    }
}

/// The enrichment sequence with its collaborators injected.
pub struct AggregationSequence<'a, S: ?Sized, B: ?Sized> {
    store: &'a mut S,
    backend: &'a B,
    storage_key: String,
    chart_types: Vec<String>,
    trigger_delay: Duration,
}

impl<'a, S, B> AggregationSequence<'a, S, B>
where
    S: KeyValueStore + ?Sized,
    B: AnalyticsBackend + ?Sized,
{
    pub fn new(store: &'a mut S, backend: &'a B, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            backend,
            storage_key: storage_key.into(),
            chart_types: DEFAULT_CHART_TYPES.iter().map(|s| s.to_string()).collect(),
            trigger_delay: Duration::ZERO,
        }
    }

    /// Chart categories requested from `/charts`.
    pub fn with_chart_types(mut self, chart_types: Vec<String>) -> Self {
        self.chart_types = chart_types;
        self
    }

    /// Pause before the first call, so the loading animation can play.
    pub fn with_trigger_delay(mut self, delay: Duration) -> Self {
        self.trigger_delay = delay;
        self
    }

    /// Run the whole sequence to completion.
    ///
    /// Only store failures are returned as errors. Backend failures end up
    /// in the report's outcomes.
    pub async fn run(self) -> Result<AggregationReport, StoreError> {
        let Some(mut record) = load_record(&*self.store, &self.storage_key)? else {
            error!("No data found under '{}'", self.storage_key);
            return Ok(AggregationReport {
                navigation: Navigation::Entry,
                outcomes: Vec::new(),
                record: None,
            });
        };

        info!(
            "Loaded record for {} ({})",
            record.company_name, record.industry
        );

        if !self.trigger_delay.is_zero() {
            debug!("Waiting {:?} before enrichment", self.trigger_delay);
            tokio::time::sleep(self.trigger_delay).await;
        }

        info!("Fetching additional data...");
        let mut outcomes = Vec::with_capacity(EnrichmentTask::ORDER.len());
        for task in EnrichmentTask::ORDER {
            let outcome = self.enrich(task, &mut record).await;
            outcomes.push((task, outcome));
        }

        save_record(self.store, &self.storage_key, &record)?;
        info!("Data saved, redirecting to dashboard");

        Ok(AggregationReport {
            navigation: Navigation::Dashboard,
            outcomes,
            record: Some(record),
        })
    }

    /// Issue one call and merge its result. Never fails.
    async fn enrich(&self, task: EnrichmentTask, record: &mut AnalysisRecord) -> CallOutcome {
        debug!("Requesting {}", task);

        match self.fetch(task, record).await {
            Ok(value) => {
                task.merge_into(record, value);
                info!("{} loaded", task);
                CallOutcome::Success
            }
            Err(EnrichmentError::Status { status, body }) => {
                warn!("{} failed ({}): {}", task, status, body);
                CallOutcome::Failed(format!("status {}", status))
            }
            Err(e) => {
                warn!("{} error: {}", task, e);
                CallOutcome::Failed(e.to_string())
            }
        }
    }

    async fn fetch(
        &self,
        task: EnrichmentTask,
        record: &AnalysisRecord,
    ) -> Result<serde_json::Value, EnrichmentError> {
        let body = match task {
            EnrichmentTask::Recommendations => {
                self.backend
                    .recommendations(&recommendations_request(record))
                    .await?
            }
            EnrichmentTask::Charts => {
                self.backend
                    .charts(&charts_request(record, &self.chart_types))
                    .await?
            }
            EnrichmentTask::Predictions => {
                self.backend.predict(&predict_request(record)).await?
            }
        };
        task.extract(body)
    }
}
