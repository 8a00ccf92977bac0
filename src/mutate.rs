//! Operator mutations over a classified dataset.

use serde::{Deserialize, Serialize};

use crate::classify::EmailClassifier;
use crate::dataset::{Dataset, RowStatus};
use crate::error::{Result, SqueegeeError};
use crate::stats::Stats;

/// An operator action over the row set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Mutation {
    /// Overwrite one row's email with operator-supplied text.
    Edit { row_id: u64, text: String },
    /// Promote one row's pending suggestion into its email.
    AcceptSuggestion { row_id: u64 },
    /// Promote every pending suggestion in the dataset.
    AcceptAll,
    /// Restore every row to its ingestion-time state and revalidate.
    Reset,
}

/// What a mutation did, plus the statistics recomputed after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    /// Rows the action actually changed.
    pub rows_affected: usize,
    /// Fresh aggregate statistics.
    pub stats: Stats,
}

impl Dataset {
    /// Apply one operator action, then recompute statistics.
    ///
    /// Statistics are recomputed once per action, after the whole sweep for
    /// [`Mutation::AcceptAll`]. Accepting a suggestion on a row that has
    /// none is a reported no-op (`rows_affected == 0`), not an error.
    ///
    /// Fails with [`SqueegeeError::ValidationIncomplete`] while any row is
    /// still pending and with [`SqueegeeError::RowNotFound`] for an unknown
    /// row id.
    pub fn apply(
        &mut self,
        classifier: &EmailClassifier,
        mutation: Mutation,
    ) -> Result<MutationOutcome> {
        if self.has_pending() {
            return Err(SqueegeeError::ValidationIncomplete);
        }

        let rows_affected = match mutation {
            Mutation::Edit { row_id, text } => self.edit_row(classifier, row_id, &text)?,
            Mutation::AcceptSuggestion { row_id } => self.accept_suggestion(row_id)?,
            Mutation::AcceptAll => self.accept_all(),
            Mutation::Reset => self.reset(classifier),
        };

        Ok(MutationOutcome {
            rows_affected,
            stats: self.stats(),
        })
    }

    /// Manual edits re-run only the reduced structural checks; see
    /// [`EmailClassifier::classify_edited`].
    fn edit_row(&mut self, classifier: &EmailClassifier, row_id: u64, text: &str) -> Result<usize> {
        let email_column = self.email_column().to_string();
        let row = self
            .row_mut(row_id)
            .ok_or(SqueegeeError::RowNotFound(row_id))?;

        let normalized = text.trim().to_lowercase();
        let classification = classifier.classify_edited(&normalized);
        row.set_email(normalized, &email_column);
        row.set_classification(classification);
        Ok(1)
    }

    fn accept_suggestion(&mut self, row_id: u64) -> Result<usize> {
        let email_column = self.email_column().to_string();
        let row = self
            .row_mut(row_id)
            .ok_or(SqueegeeError::RowNotFound(row_id))?;

        Ok(usize::from(row.promote_suggestion(&email_column)))
    }

    fn accept_all(&mut self) -> usize {
        let email_column = self.email_column().to_string();
        let mut affected = 0;

        for row in self.rows_mut() {
            if row.status() == RowStatus::Fixable && row.promote_suggestion(&email_column) {
                affected += 1;
            }
        }

        affected
    }

    fn reset(&mut self, classifier: &EmailClassifier) -> usize {
        let email_column = self.email_column().to_string();
        for row in self.rows_mut() {
            row.restore(&email_column);
        }

        self.classify(classifier);
        self.len()
    }
}
