//! Booklog export specifics: the column schema of the CSV, its legacy
//! encoding, and normalization of one raw row into a [`BookRecord`].
//!
//! The export is a headerless CSV in cp932 (Shift_JIS), with a fixed
//! positional schema. Normalization is total: any row matching the schema
//! produces a record, with empty cells mapping to absent fields and a
//! non-numeric rating mapping to "no rating recorded".

use crate::error::Result;
use crate::model::BookRecord;
use csv::StringRecord;
use std::fs;
use std::path::Path;

/// Column order of the Booklog CSV export. Trailing columns beyond the
/// ones we read are tolerated, as are rows that end early.
pub const CSV_COLUMNS: [&str; 17] = [
    "service_id",
    "item_id",
    "isbn13",
    "category",
    "rating",
    "status",
    "review",
    "tags",
    "memo",
    "registered_at",
    "finished_at",
    "title",
    "author",
    "publisher",
    "publish_year",
    "type",
    "page_count",
];

const COL_ITEM_ID: usize = 1;
const COL_ISBN13: usize = 2;
const COL_RATING: usize = 4;
const COL_STATUS: usize = 5;
const COL_TITLE: usize = 11;
const COL_AUTHOR: usize = 12;
const COL_PUBLISHER: usize = 13;
const COL_PUBLISH_YEAR: usize = 14;

/// Encoding of the export file. cp932 is a Shift_JIS superset; the
/// characters Booklog emits decode identically under either label.
pub const CSV_ENCODING: &encoding_rs::Encoding = encoding_rs::SHIFT_JIS;

/// Read the whole export, decoding from [`CSV_ENCODING`], and normalize
/// every row.
pub fn read_records(csv_path: &Path) -> Result<Vec<BookRecord>> {
    let raw = fs::read(csv_path)?;
    let (decoded, _, _) = CSV_ENCODING.decode(&raw);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(normalize_row(&row?));
    }
    Ok(records)
}

/// Map one raw row to a [`BookRecord`]. Pure, never fails.
pub fn normalize_row(row: &StringRecord) -> BookRecord {
    BookRecord {
        item_id: row.get(COL_ITEM_ID).unwrap_or("").to_string(),
        title: row.get(COL_TITLE).unwrap_or("").to_string(),
        author: cell(row, COL_AUTHOR),
        isbn13: cell(row, COL_ISBN13),
        publisher: cell(row, COL_PUBLISHER),
        publish_year: cell(row, COL_PUBLISH_YEAR),
        status: cell(row, COL_STATUS),
        rating: parse_rating(row.get(COL_RATING).unwrap_or("")),
    }
}

fn cell(row: &StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// A rating is an integer only when the raw cell is nothing but decimal
/// digits. Anything else — empty, "★★★", whitespace — is absent, not zero
/// and not an error.
fn parse_rating(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
