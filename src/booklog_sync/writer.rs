//! Creates and updates note files.
//!
//! The body of a note belongs to the user; an update rewrites the header
//! region only and carries the body over byte for byte. When nothing
//! changed, the file is not touched at all — not even its mtime. Writes
//! go through a temp file in the target directory followed by a rename,
//! so an interrupted run never leaves a half-written note.

use crate::diff::{diff_header, FieldChange};
use crate::error::Result;
use crate::filename::note_filename;
use crate::frontmatter::{self, NoteContent};
use crate::model::{BookRecord, SyncOutcome};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Write one book into the vault.
///
/// Without an existing note, the record becomes a new file named from its
/// metadata; `body` seeds the new note's body (create path only). With an
/// existing note, the candidate fields are merged into its header.
pub fn save_book(
    books_dir: &Path,
    record: &BookRecord,
    body: Option<&str>,
    existing: Option<&Path>,
) -> Result<SyncOutcome> {
    match existing {
        None => create_note(books_dir, record, body.unwrap_or("")),
        Some(path) => update_note(path, record),
    }
}

fn create_note(books_dir: &Path, record: &BookRecord, body: &str) -> Result<SyncOutcome> {
    fs::create_dir_all(books_dir)?;
    let filename = note_filename(
        record.author.as_deref().unwrap_or(""),
        &record.title,
        record.publisher.as_deref().unwrap_or(""),
        record.publish_year.as_deref().unwrap_or(""),
    );
    let path = books_dir.join(filename);
    let header = frontmatter::record_to_header(record);
    write_atomic(&path, &frontmatter::render_note(&header, body)?)?;
    info!("Created: {}", path.display());
    Ok(SyncOutcome::Created)
}

fn update_note(path: &Path, record: &BookRecord) -> Result<SyncOutcome> {
    let current = fs::read_to_string(path)?;
    let (mut header, body) = match frontmatter::split_note(&current) {
        NoteContent::Parsed { header, body } => (header, body),
        // Malformed header: rebuild it in full from the record, keep only
        // the salvageable body.
        NoteContent::Unparsable { salvaged_body } => (Mapping::new(), salvaged_body),
    };

    let changes = diff_header(&header, record);
    if changes.is_empty() {
        debug!("No changes in {}", path.display());
        return Ok(SyncOutcome::Unchanged);
    }
    info!("Changes detected in {}: {:?}", path.display(), changes);

    apply_changes(&mut header, &changes);
    write_atomic(path, &frontmatter::render_note(&header, &body)?)?;
    Ok(SyncOutcome::Updated)
}

/// Merge a diff into a header. Existing keys keep their position, new
/// keys append; a field retired by the candidate keeps its key with an
/// explicit null.
fn apply_changes(header: &mut Mapping, changes: &[FieldChange]) {
    for change in changes {
        let key = Value::String(change.field.to_string());
        match &change.new {
            Some(value) => header.insert(key, value.clone()),
            None => header.insert(key, Value::Null),
        };
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
