//! Per-run index of the vault: stable book identifier → note path.
//!
//! The index is rebuilt from a single non-recursive directory scan at the
//! start of every sync run and discarded at the end. It is never
//! persisted and never refreshed mid-run — a run's create/update
//! decisions are based on one consistent snapshot of the vault.

use crate::frontmatter::MARKER;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub type NoteIndex = BTreeMap<String, PathBuf>;

/// Scan `books_dir` and map each note's `item_id` to its path.
///
/// A missing directory yields an empty index — the first run has no notes
/// yet. Notes without an extractable identifier are skipped. Entries are
/// visited in sorted filename order so duplicate identifiers shadow
/// deterministically; a duplicate is reported and the last sorted entry
/// wins.
pub fn build_note_index(books_dir: &Path) -> crate::error::Result<NoteIndex> {
    let mut index = NoteIndex::new();
    if !books_dir.is_dir() {
        return Ok(index);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(books_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    for path in paths {
        let Ok(content) = fs::read_to_string(&path) else {
            warn!("skipping unreadable note: {}", path.display());
            continue;
        };
        let Some(item_id) = extract_item_id(&content) else {
            debug!("no item_id in {}, skipping", path.display());
            continue;
        };
        if let Some(previous) = index.insert(item_id.clone(), path.clone()) {
            warn!(
                "duplicate item_id {item_id}: {} shadows {}",
                path.display(),
                previous.display()
            );
        }
    }
    Ok(index)
}

/// Pull the `item_id` value out of the header region with a plain line
/// scan. Works whether or not the value is quoted, and does not require
/// the header to be valid YAML.
fn extract_item_id(content: &str) -> Option<String> {
    let mut lines = content.lines();
    if lines.next()?.trim_end() != MARKER {
        return None;
    }
    for line in lines {
        if line.trim_end() == MARKER {
            break;
        }
        if let Some(raw) = line.strip_prefix("item_id:") {
            let value = raw.trim().trim_matches(['\'', '"']);
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_note(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_directory_is_an_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = build_note_index(&dir.path().join("does-not-exist")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn maps_identifiers_to_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_note(dir.path(), "a.md", "---\nitem_id: '111'\n---\n");
        let b = write_note(dir.path(), "b.md", "---\nitem_id: 222\n---\nbody\n");

        let index = build_note_index(dir.path()).unwrap();
        assert_eq!(index.get("111"), Some(&a));
        assert_eq!(index.get("222"), Some(&b));
    }

    #[test]
    fn skips_files_without_an_identifier() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "plain.md", "no frontmatter at all\n");
        write_note(dir.path(), "other.md", "---\ntitle: something\n---\n");
        write_note(dir.path(), "notes.txt", "---\nitem_id: '9'\n---\n");

        let index = build_note_index(dir.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn identifier_in_the_body_is_not_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        write_note(
            dir.path(),
            "tricky.md",
            "---\ntitle: t\n---\nitem_id: '999'\n",
        );
        let index = build_note_index(dir.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn duplicate_identifiers_resolve_to_the_last_sorted_entry() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "a.md", "---\nitem_id: '111'\n---\n");
        let later = write_note(dir.path(), "z.md", "---\nitem_id: '111'\n---\n");

        let index = build_note_index(dir.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("111"), Some(&later));
    }

    #[test]
    fn extraction_tolerates_broken_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_note(
            dir.path(),
            "broken.md",
            "---\n: [ not yaml\nitem_id: \"333\"\n---\n",
        );
        let index = build_note_index(dir.path()).unwrap();
        assert_eq!(index.get("333"), Some(&path));
    }
}
