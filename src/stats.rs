//! Aggregate dataset statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify::ErrorKind;
use crate::dataset::{Row, RowStatus};

/// Aggregate counts over a dataset.
///
/// Always recomputed from the rows in full, never patched incrementally, so
/// it cannot drift from the row set it describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of rows.
    pub total: usize,
    /// Rows with no detected defect.
    pub valid: usize,
    /// Rows with a defect and a mechanical correction.
    pub fixable: usize,
    /// Rows with a defect and no correction.
    pub invalid: usize,
    /// Rows per detected defect kind.
    pub by_error: HashMap<ErrorKind, usize>,
}

impl Stats {
    /// Recompute statistics from scratch over the given rows.
    pub fn compute(rows: &[Row]) -> Self {
        let mut stats = Stats {
            total: rows.len(),
            ..Stats::default()
        };

        for row in rows {
            match row.status() {
                RowStatus::Valid => stats.valid += 1,
                RowStatus::Fixable => stats.fixable += 1,
                RowStatus::Invalid => stats.invalid += 1,
                RowStatus::Pending => {}
            }
            if let Some(kind) = row.error() {
                *stats.by_error.entry(kind).or_insert(0) += 1;
            }
        }

        stats
    }

    /// Count of rows flagged with the given defect kind.
    pub fn error_count(&self, kind: ErrorKind) -> usize {
        self.by_error.get(&kind).copied().unwrap_or(0)
    }

    /// Percentage of rows currently valid, rounded down. An empty dataset
    /// counts as fully valid.
    pub fn percent_valid(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.valid * 100 / self.total) as u32
    }
}
