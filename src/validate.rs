//! Chunked batch validation with progress reporting.

use serde::{Deserialize, Serialize};

use crate::classify::EmailClassifier;
use crate::dataset::Dataset;
use crate::stats::Stats;

/// Number of rows classified between suspension points.
pub const CHUNK_SIZE: usize = 100;

/// Progress of a validation run after a completed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Rows classified so far.
    pub processed: usize,
    /// Total rows in the run.
    pub total: usize,
}

impl Progress {
    /// Whole-number completion percentage, rounded down.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.processed * 100 / self.total) as u32
    }
}

/// A resumable classification pass over one dataset.
///
/// Each [`step`](ValidationRun::step) classifies one chunk of rows in
/// ingestion order, then hands control back so a host can keep its event
/// loop live and surface progress between chunks. Chunking never changes
/// per-row results, only how often control comes back; re-running over the
/// same input produces identical classifications and chunk boundaries.
///
/// The run borrows the dataset mutably for its whole lifetime, so mutations
/// cannot interleave with an in-flight run. A run dropped part-way leaves
/// the untouched rows pending, and mutations refuse to operate until a
/// later run completes.
pub struct ValidationRun<'a> {
    dataset: &'a mut Dataset,
    classifier: &'a EmailClassifier,
    cursor: usize,
    chunk_size: usize,
}

impl<'a> ValidationRun<'a> {
    /// Create a run over the whole dataset with the default chunk size.
    pub fn new(dataset: &'a mut Dataset, classifier: &'a EmailClassifier) -> Self {
        ValidationRun {
            dataset,
            classifier,
            cursor: 0,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Override the chunk size (minimum 1). Affects progress granularity
    /// only, never classification outcomes.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Check if every row has been classified by this run.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.dataset.len()
    }

    /// Classify the next chunk of rows.
    ///
    /// Returns the progress after the chunk, or `None` when the run had
    /// already covered every row.
    pub fn step(&mut self) -> Option<Progress> {
        if self.is_complete() {
            return None;
        }

        let end = usize::min(self.cursor + self.chunk_size, self.dataset.len());
        for index in self.cursor..end {
            self.dataset.classify_row_at(index, self.classifier);
        }
        self.cursor = end;

        Some(Progress {
            processed: self.cursor,
            total: self.dataset.len(),
        })
    }

    /// Drive the run to completion, invoking `on_progress` after each chunk,
    /// then compute the final statistics in one pass.
    pub fn run<F>(mut self, mut on_progress: F) -> Stats
    where
        F: FnMut(Progress),
    {
        while let Some(progress) = self.step() {
            on_progress(progress);
        }
        self.dataset.stats()
    }
}

impl Dataset {
    /// Classify every row and return the aggregate statistics.
    pub fn classify(&mut self, classifier: &EmailClassifier) -> Stats {
        self.classify_with_progress(classifier, |_| {})
    }

    /// Classify every row in chunks of [`CHUNK_SIZE`], reporting progress
    /// after each chunk.
    pub fn classify_with_progress<F>(
        &mut self,
        classifier: &EmailClassifier,
        on_progress: F,
    ) -> Stats
    where
        F: FnMut(Progress),
    {
        ValidationRun::new(self, classifier).run(on_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RowStatus;
    use crate::record::Record;

    fn dataset_of(count: usize) -> Dataset {
        let columns = vec!["name".to_string(), "email".to_string()];
        let records: Vec<Record> = (0..count)
            .map(|i| {
                [("name", format!("user{i}")), ("email", format!("user{i}@example.com"))]
                    .into_iter()
                    .collect()
            })
            .collect();
        Dataset::ingest(columns, records).unwrap()
    }

    #[test]
    fn test_progress_percent_rounds_down() {
        assert_eq!(Progress { processed: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { processed: 2, total: 3 }.percent(), 66);
        assert_eq!(Progress { processed: 3, total: 3 }.percent(), 100);
        assert_eq!(Progress { processed: 0, total: 0 }.percent(), 100);
    }

    #[test]
    fn test_run_reports_chunk_boundaries() {
        let mut dataset = dataset_of(250);
        let classifier = EmailClassifier::new();
        let mut seen = Vec::new();

        let stats = dataset.classify_with_progress(&classifier, |progress| {
            seen.push((progress.processed, progress.percent()));
        });

        assert_eq!(seen, vec![(100, 40), (200, 80), (250, 100)]);
        assert_eq!(stats.total, 250);
        assert_eq!(stats.valid, 250);
        assert!(!dataset.has_pending());
    }

    #[test]
    fn test_stepwise_run_matches_one_shot() {
        let classifier = EmailClassifier::new();

        let mut stepped = dataset_of(25);
        let mut run = ValidationRun::new(&mut stepped, &classifier).with_chunk_size(4);
        while run.step().is_some() {}
        drop(run);

        let mut one_shot = dataset_of(25);
        one_shot.classify(&classifier);

        for (a, b) in stepped.rows().iter().zip(one_shot.rows()) {
            assert_eq!(a.status(), b.status());
            assert_eq!(a.error(), b.error());
            assert_eq!(a.suggestion(), b.suggestion());
        }
    }

    #[test]
    fn test_abandoned_run_leaves_rows_pending() {
        let mut dataset = dataset_of(10);
        let classifier = EmailClassifier::new();

        let mut run = ValidationRun::new(&mut dataset, &classifier).with_chunk_size(4);
        let progress = run.step().unwrap();
        assert_eq!(progress.processed, 4);
        assert!(!run.is_complete());
        drop(run);

        assert!(dataset.has_pending());
        assert_eq!(dataset.rows()[0].status(), RowStatus::Valid);
        assert_eq!(dataset.rows()[9].status(), RowStatus::Pending);
    }

    #[test]
    fn test_empty_dataset_completes_without_progress() {
        let mut dataset = dataset_of(0);
        let classifier = EmailClassifier::new();
        let mut calls = 0;

        let stats = dataset.classify_with_progress(&classifier, |_| calls += 1);

        assert_eq!(calls, 0);
        assert_eq!(stats.total, 0);
    }
}
