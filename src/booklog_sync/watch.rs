//! Watch mode: re-run the sync whenever the CSV changes.
//!
//! Bursts of filesystem events (editors and the Booklog exporter both
//! write in several steps) are coalesced: a change arms a debounce timer,
//! further changes inside the quiet window re-arm it, and the sync runs
//! once when the window expires. Runs are strictly serialized on this
//! thread — the sync core is not reentrant against concurrent runs over
//! the same vault. A failed run is logged and watching continues.

use crate::error::{Result, SyncError};
use crate::sync::run_sync;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Quiet period before a burst of changes is acted on.
pub const DEBOUNCE: Duration = Duration::from_secs(2);

/// Watch the CSV's parent directory and re-sync on changes. Blocks until
/// the watcher dies; the caller is expected to have run an initial sync.
pub fn start_watching(csv_path: &Path, books_path: &Path) -> Result<()> {
    watch_loop(csv_path, books_path, DEBOUNCE)
}

fn watch_loop(csv_path: &Path, books_path: &Path, debounce: Duration) -> Result<()> {
    let csv_path = csv_path.canonicalize()?;
    let watch_dir = csv_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            SyncError::Config(format!(
                "cannot watch {}: no parent directory",
                csv_path.display()
            ))
        })?;

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
    info!("Watching {} for changes", csv_path.display());

    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(()), // watcher gone
        };
        if !touches_csv(&event, &csv_path) {
            continue;
        }

        // Debounce: absorb events until the CSV has been quiet for the
        // full window. Only events touching the CSV re-arm the timer.
        let mut deadline = Instant::now() + debounce;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match rx.recv_timeout(deadline - now) {
                Ok(event) if touches_csv(&event, &csv_path) => {
                    deadline = Instant::now() + debounce;
                }
                Ok(_) => {}
                Err(mpsc::RecvTimeoutError::Timeout) => break,
                Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }

        info!("CSV changed, running sync");
        if let Err(err) = run_sync(&csv_path, books_path) {
            error!("sync failed: {err}");
        }
    }
}

fn touches_csv(event: &notify::Result<Event>, csv_path: &Path) -> bool {
    let event = match event {
        Ok(event) => event,
        Err(err) => {
            debug!("watch event error: {err}");
            return false;
        }
    };
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }
    // Editors often replace the file, so a path compare by name is the
    // reliable option inside a single watched directory.
    event
        .paths
        .iter()
        .any(|p| p == csv_path || file_names_match(p, csv_path))
}

fn file_names_match(a: &Path, b: &Path) -> bool {
    match (a.file_name(), b.file_name()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, paths: Vec<PathBuf>) -> notify::Result<Event> {
        let mut event = Event::new(kind);
        event.paths = paths;
        Ok(event)
    }

    #[test]
    fn modify_of_the_csv_triggers() {
        let csv = PathBuf::from("/data/booklog.csv");
        let ev = event(EventKind::Modify(ModifyKind::Any), vec![csv.clone()]);
        assert!(touches_csv(&ev, &csv));
    }

    #[test]
    fn create_by_same_name_triggers() {
        let csv = PathBuf::from("/data/booklog.csv");
        let ev = event(
            EventKind::Create(CreateKind::File),
            vec![PathBuf::from("/private/data/booklog.csv")],
        );
        assert!(touches_csv(&ev, &csv));
    }

    #[test]
    fn other_files_do_not_trigger() {
        let csv = PathBuf::from("/data/booklog.csv");
        let ev = event(
            EventKind::Modify(ModifyKind::Any),
            vec![PathBuf::from("/data/other.csv")],
        );
        assert!(!touches_csv(&ev, &csv));
    }

    #[test]
    fn removals_do_not_trigger() {
        let csv = PathBuf::from("/data/booklog.csv");
        let ev = event(EventKind::Remove(RemoveKind::File), vec![csv.clone()]);
        assert!(!touches_csv(&ev, &csv));
    }
}
