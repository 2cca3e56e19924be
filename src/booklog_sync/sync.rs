//! One sync run: build the vault index once, read the CSV end to end, and
//! reconcile each row against the vault.
//!
//! Rows are processed strictly in order, one at a time. A write failure
//! aborts the remaining rows — there is no semantic recovery boundary
//! between rows — while notes written earlier in the run stay in place.

use crate::booklog;
use crate::error::Result;
use crate::index::build_note_index;
use crate::model::SyncOutcome;
use crate::writer::save_book;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Counters for one sync run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl SyncReport {
    fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created => self.created += 1,
            SyncOutcome::Updated => self.updated += 1,
            SyncOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// Run one sync of `csv_path` into `books_path`.
pub fn run_sync(csv_path: &Path, books_path: &Path) -> Result<SyncReport> {
    let index = build_note_index(books_path)?;
    debug!("note index: {index:?}");

    let mut report = SyncReport::default();
    for record in booklog::read_records(csv_path)? {
        if record.item_id.is_empty() {
            warn!("skipping row without item_id (title: {:?})", record.title);
            continue;
        }
        let existing = index.get(&record.item_id).map(PathBuf::as_path);
        let outcome = save_book(books_path, &record, None, existing)?;
        debug!("{}: {}", record.item_id, outcome.as_str());
        report.record(outcome);
    }

    info!(
        "Sync completed: {} created, {} updated, {} unchanged",
        report.created, report.updated, report.unchanged
    );
    Ok(report)
}
