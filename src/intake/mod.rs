//! Form intake.
//!
//! Collects the company name, industry and CSV upload, checks that all
//! of them are present, and writes a fresh analysis record to the store.

use crate::error::{IntakeError, SubmitError};
use crate::models::{AnalysisRecord, Navigation};
use crate::store::{save_record, KeyValueStore};
use chrono::NaiveDate;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

/// Fields submitted through the intake form.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub company_name: String,
    pub industry: String,
    pub csv_file: Option<PathBuf>,
    /// Identifier assigned by the backend when the CSV was uploaded.
    pub filename: Option<String>,
    pub kpis: Option<Value>,
    pub profile: Option<Value>,
}

impl IntakeForm {
    /// Check that every required field is filled in.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.company_name.trim().is_empty() {
            return Err(IntakeError::MissingField("company name"));
        }
        if self.industry.trim().is_empty() {
            return Err(IntakeError::MissingField("industry"));
        }

        let csv = self
            .csv_file
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(IntakeError::MissingField("CSV file"))?;
        if !csv.is_file() {
            return Err(IntakeError::FileNotFound(csv.clone()));
        }

        Ok(())
    }

    /// Build the record for a validated form, dated `today`.
    pub fn into_record(self, today: NaiveDate) -> Result<AnalysisRecord, IntakeError> {
        self.validate()?;

        let file_name = self
            .csv_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(IntakeError::MissingField("CSV file"))?;

        let mut record = AnalysisRecord::new(
            self.company_name.trim(),
            self.industry.trim(),
            file_name,
        );
        record.analysis_date = Some(format_analysis_date(today));
        record.filename = self.filename;
        record.kpis = self.kpis;
        record.profile = self.profile;
        Ok(record)
    }
}

/// Long-form date, e.g. `19 October 2026`.
pub fn format_analysis_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Validate the form, save the record and move on to the loading stage.
pub fn submit<S: KeyValueStore + ?Sized>(
    store: &mut S,
    storage_key: &str,
    form: IntakeForm,
    today: NaiveDate,
) -> Result<(AnalysisRecord, Navigation), SubmitError> {
    let record = form.into_record(today)?;
    debug!("Intake record: {:?}", record);

    save_record(store, storage_key, &record)?;
    info!(
        "Saved intake for {} ({}), file {}",
        record.company_name, record.industry, record.file_name
    );

    Ok((record, Navigation::Loading))
}
