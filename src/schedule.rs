//! Batched extraction scheduling
//!
//! Partitions the top-level key space into fixed-size batches and drives
//! the extractor batch by batch. The host calls [`ExtractionRun::step`] in
//! a loop and may interleave its own work (progress display, UI updates)
//! between calls; stepping is the run's only suspension point. Batch size
//! affects progress granularity only, never record content or order.

use serde_json::Value;
use tracing::debug;

use crate::extract::{DialogueRecord, extract_entry};

/// Default number of top-level keys processed per step.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// A single extraction run over one document.
///
/// The run owns the document and the accumulating result; it is the
/// result's only writer. One run per document: a host starting a new run
/// must drop the previous run (and any records taken from it) first, never
/// interleave two runs into one accumulator.
#[derive(Debug)]
pub struct ExtractionRun {
    entries: Vec<(String, Value)>,
    batch_size: usize,
    cursor: usize,
    records: Vec<DialogueRecord>,
    aborted: bool,
}

impl ExtractionRun {
    /// Start a run over `document` with the given batch size.
    ///
    /// The document's top-level keys form the work list. A top-level array
    /// is keyed by element index; a scalar document has no keys and the run
    /// degenerates to a single no-op batch at 100% progress. A batch size
    /// of zero is clamped to 1.
    #[must_use]
    pub fn new(document: Value, batch_size: usize) -> Self {
        let entries: Vec<(String, Value)> = match document {
            Value::Object(map) => map.into_iter().collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        };

        ExtractionRun {
            entries,
            batch_size: batch_size.max(1),
            cursor: 0,
            records: Vec::new(),
            aborted: false,
        }
    }

    /// Start a run with [`DEFAULT_BATCH_SIZE`].
    #[must_use]
    pub fn with_default_batch(document: Value) -> Self {
        Self::new(document, DEFAULT_BATCH_SIZE)
    }

    /// Process the next batch of top-level entries.
    ///
    /// Each entry is extracted as a singleton one-key object, preserving
    /// its key as the path root; records are appended in order. Returns
    /// `true` while unprocessed entries remain.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let end = usize::min(self.cursor + self.batch_size, self.entries.len());
        for (key, value) in &self.entries[self.cursor..end] {
            extract_entry(key, value, &mut self.records);
        }
        self.cursor = end;

        debug!(
            processed = self.cursor,
            total = self.entries.len(),
            records = self.records.len(),
            "extraction batch complete"
        );

        !self.is_finished()
    }

    /// Progress as an integer percentage in 0..=100.
    ///
    /// `min(100, round(processed / total * 100))`; 100 immediately when the
    /// document has no top-level keys.
    #[must_use]
    pub fn progress(&self) -> u8 {
        if self.entries.is_empty() {
            return 100;
        }
        let pct = (self.cursor as f64 / self.entries.len() as f64 * 100.0).round();
        pct.min(100.0) as u8
    }

    /// Number of top-level entries in the work list.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Whether the run will do no further work (completed or aborted).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.aborted || self.cursor >= self.entries.len()
    }

    /// Whether every top-level entry was processed.
    ///
    /// An aborted run is finished but never complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.aborted && self.cursor >= self.entries.len()
    }

    /// Abort the run between batches.
    ///
    /// Remaining work is released; records already produced stay readable
    /// as a partial result but the run never reports complete.
    pub fn abort(&mut self) {
        self.aborted = true;
        self.entries.truncate(self.cursor);
    }

    /// Records produced so far, in strict batch-then-discovery order.
    #[must_use]
    pub fn records(&self) -> &[DialogueRecord] {
        &self.records
    }

    /// Consume the run and take its records.
    #[must_use]
    pub fn finish(self) -> Vec<DialogueRecord> {
        self.records
    }
}

/// One-shot extraction of a whole document.
///
/// Equivalent to driving an [`ExtractionRun`] to completion with any batch
/// size; provided for hosts that do not need progress reporting.
#[must_use]
pub fn extract_document(document: &Value) -> Vec<DialogueRecord> {
    let mut records = Vec::new();
    match document {
        Value::Object(map) => {
            for (key, value) in map {
                extract_entry(key, value, &mut records);
            }
        }
        Value::Array(items) => {
            for (i, value) in items.iter().enumerate() {
                extract_entry(&i.to_string(), value, &mut records);
            }
        }
        _ => {}
    }
    records
}
