//! Datasets: ingestion, rows, header detection, and export projection.

use serde::{Deserialize, Serialize};

use crate::classify::{Classification, EmailClassifier, EmailStatus, ErrorKind};
use crate::error::{Result, SqueegeeError};
use crate::record::Record;
use crate::stats::Stats;

/// Classification state of a row.
///
/// `Pending` only exists between ingestion (or a reset) and the completion
/// of a validation run; mutations refuse to touch a dataset that still
/// carries pending rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Pending,
    Valid,
    Fixable,
    Invalid,
}

impl From<EmailStatus> for RowStatus {
    fn from(status: EmailStatus) -> Self {
        match status {
            EmailStatus::Valid => RowStatus::Valid,
            EmailStatus::Fixable => RowStatus::Fixable,
            EmailStatus::Invalid => RowStatus::Invalid,
        }
    }
}

/// One record under validation: the working email value, its ingestion-time
/// snapshots, and the current classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    id: u64,
    name: String,
    email: String,
    original_email: String,
    ingested_email: String,
    status: RowStatus,
    error: Option<ErrorKind>,
    suggestion: Option<String>,
    original_row: Record,
}

impl Row {
    fn ingest(
        id: u64,
        columns: &[String],
        email_column: &str,
        name_column: &str,
        record: Record,
    ) -> Self {
        let original_row = normalize_record(columns, record);
        let ingested_email = original_row.get(email_column).unwrap_or_default().to_string();
        let email = ingested_email.trim().to_lowercase();
        let name = original_row
            .get(name_column)
            .unwrap_or_default()
            .trim()
            .to_string();

        Row {
            id,
            name,
            original_email: email.clone(),
            email,
            ingested_email,
            status: RowStatus::Pending,
            error: None,
            suggestion: None,
            original_row,
        }
    }

    /// Stable row id, assigned in ingestion order.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Trimmed value of the detected name column (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current working email value, always trimmed and lower-cased.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Normalized snapshot of the email at ingestion time. Never reassigned.
    pub fn original_email(&self) -> &str {
        &self.original_email
    }

    /// Current classification status.
    pub fn status(&self) -> RowStatus {
        self.status
    }

    /// The detected defect, absent for valid or pending rows.
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Mechanically corrected address, present exactly when the row is
    /// [`RowStatus::Fixable`].
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// The full original record, including columns unused by validation.
    pub fn original_row(&self) -> &Record {
        &self.original_row
    }

    pub(crate) fn set_classification(&mut self, classification: Classification) {
        self.status = classification.status.into();
        self.error = classification.error;
        self.suggestion = classification.suggestion;
    }

    pub(crate) fn set_email(&mut self, email: String, email_column: &str) {
        self.original_row.set(email_column, email.clone());
        self.email = email;
    }

    /// Copy the pending suggestion into the working email. Returns false
    /// when there is nothing to promote.
    pub(crate) fn promote_suggestion(&mut self, email_column: &str) -> bool {
        let Some(suggestion) = self.suggestion.take() else {
            return false;
        };
        self.original_row.set(email_column, suggestion.clone());
        self.email = suggestion;
        self.status = RowStatus::Valid;
        self.error = None;
        true
    }

    /// Put the row back in its ingestion-time state, awaiting revalidation.
    pub(crate) fn restore(&mut self, email_column: &str) {
        self.email = self.original_email.clone();
        self.original_row.set(email_column, self.ingested_email.clone());
        self.status = RowStatus::Pending;
        self.error = None;
        self.suggestion = None;
    }
}

/// A loaded table: its columns, the detected name/email columns, and the
/// rows in ingestion order.
///
/// Row order is stable under every mutation; a reset reclassifies in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    email_column: String,
    name_column: String,
    rows: Vec<Row>,
}

impl Dataset {
    /// Ingest a table of raw records.
    ///
    /// The email and name columns are detected by case-insensitive substring
    /// match on the headers, falling back to the second and first column
    /// respectively. Fails when fewer than two columns are supplied.
    pub fn ingest(columns: Vec<String>, records: Vec<Record>) -> Result<Dataset> {
        if columns.len() < 2 {
            return Err(SqueegeeError::MissingNameOrEmailColumn);
        }

        let email_column = detect_column(&columns, "email").unwrap_or_else(|| columns[1].clone());
        let name_column = detect_column(&columns, "name").unwrap_or_else(|| columns[0].clone());

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Row::ingest(index as u64, &columns, &email_column, &name_column, record)
            })
            .collect();

        Ok(Dataset {
            columns,
            email_column,
            name_column,
            rows,
        })
    }

    /// Original column names in ingestion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The detected email column name.
    pub fn email_column(&self) -> &str {
        &self.email_column
    }

    /// The detected name column name.
    pub fn name_column(&self) -> &str {
        &self.name_column
    }

    /// All rows in ingestion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Look up a row by id.
    pub fn row(&self, id: u64) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if any row is still awaiting validation.
    pub fn has_pending(&self) -> bool {
        self.rows.iter().any(|row| row.status == RowStatus::Pending)
    }

    /// Recompute aggregate statistics from the rows.
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.rows)
    }

    /// Project the dataset back into raw records for serialization.
    ///
    /// Every ingested column survives in its original order; only the email
    /// cell reflects the row's current working value.
    pub fn export(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = row.original_row.clone();
                record.set(self.email_column.as_str(), row.email.as_str());
                record
            })
            .collect()
    }

    pub(crate) fn row_mut(&mut self, id: u64) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub(crate) fn classify_row_at(&mut self, index: usize, classifier: &EmailClassifier) {
        if let Some(row) = self.rows.get_mut(index) {
            let classification = classifier.classify(&row.email);
            row.set_classification(classification);
        }
    }
}

/// Reorder a raw record to the declared column order, keeping any extra
/// keys the source supplied after them.
fn normalize_record(columns: &[String], record: Record) -> Record {
    let mut ordered = Record::new();
    for column in columns {
        ordered.set(column.clone(), record.get(column).unwrap_or_default());
    }
    for (key, value) in record.iter() {
        if !ordered.contains_key(key) {
            ordered.set(key, value);
        }
    }
    ordered
}

fn detect_column(columns: &[String], needle: &str) -> Option<String> {
    columns
        .iter()
        .find(|column| column.to_lowercase().contains(needle))
        .cloned()
}
