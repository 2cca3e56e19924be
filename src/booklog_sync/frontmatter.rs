//! The note format: a YAML frontmatter block between `---` marker lines,
//! followed by a free-form body that this tool never interprets.
//!
//! Headers are held as [`serde_yaml::Mapping`], which preserves insertion
//! order — existing keys keep their position through a merge and new keys
//! append. A note whose header cannot be parsed is not an error: it
//! degrades to [`NoteContent::Unparsable`] with whatever body text could
//! be salvaged, and the writer rebuilds the header from scratch.

use crate::model::{BookRecord, MANAGED_KEYS};
use serde_yaml::{Mapping, Value};
use tracing::warn;

/// Marker line delimiting the frontmatter block.
pub const MARKER: &str = "---";

/// Result of splitting a note into header and body.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteContent {
    /// Well-formed note: parsed header, plus the body following the
    /// closing marker (byte-for-byte, including leading blank lines).
    Parsed { header: Mapping, body: String },
    /// No usable header. Carries the body text that could be salvaged:
    /// the whole file when there is no opening marker, everything after
    /// the closing marker when the YAML in between is broken, or nothing
    /// when the header block is unterminated.
    Unparsable { salvaged_body: String },
}

/// Split a note into header and body at the marker lines.
pub fn split_note(content: &str) -> NoteContent {
    let Some(rest) = strip_marker_line(content) else {
        // No opening marker: the whole file is user text.
        return NoteContent::Unparsable {
            salvaged_body: content.to_string(),
        };
    };
    let Some((header_text, body)) = split_at_closing_marker(rest) else {
        warn!("note has an opening marker but no closing marker; no body to salvage");
        return NoteContent::Unparsable {
            salvaged_body: String::new(),
        };
    };
    match serde_yaml::from_str::<Value>(header_text) {
        Ok(Value::Mapping(header)) => NoteContent::Parsed {
            header,
            body: body.to_string(),
        },
        Ok(Value::Null) => NoteContent::Parsed {
            header: Mapping::new(),
            body: body.to_string(),
        },
        Ok(_) | Err(_) => {
            warn!("note header is not a YAML mapping; treating it as empty");
            NoteContent::Unparsable {
                salvaged_body: body.to_string(),
            }
        }
    }
}

fn strip_marker_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(MARKER)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Find the closing marker line in `rest` and split around it. Returns
/// the header text before it and the body after it.
fn split_at_closing_marker(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    while offset < rest.len() {
        let line_end = rest[offset..]
            .find('\n')
            .map(|i| offset + i + 1)
            .unwrap_or(rest.len());
        let line = rest[offset..line_end].trim_end_matches(['\n', '\r']);
        if line == MARKER {
            return Some((&rest[..offset], &rest[line_end..]));
        }
        offset = line_end;
    }
    None
}

/// Serialize a header back to its on-disk form, markers included.
pub fn serialize_header(header: &Mapping) -> crate::error::Result<String> {
    let yaml = serde_yaml::to_string(header)?;
    Ok(format!("{MARKER}\n{yaml}{MARKER}\n"))
}

/// Build a fresh header from a record: managed keys in schema order,
/// absent fields omitted so that absence round-trips.
pub fn record_to_header(record: &BookRecord) -> Mapping {
    let mut header = Mapping::new();
    for key in MANAGED_KEYS {
        if let Some(value) = record.field_value(key) {
            header.insert(Value::String(key.to_string()), value);
        }
    }
    header
}

/// Render a full note: serialized header followed by the body, unchanged.
pub fn render_note(header: &Mapping, body: &str) -> crate::error::Result<String> {
    Ok(format!("{}{}", serialize_header(header)?, body))
}
