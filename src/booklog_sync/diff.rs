//! Field-level comparison between an existing note header and a candidate
//! record.
//!
//! This is a merge differ, not a set-equality differ: only managed keys
//! are compared, and keys the schema does not define are never reported,
//! so user-added header keys survive a merge untouched. Equality is
//! absence-aware — a missing key and an explicit YAML `null` both count
//! as absent, and absent is distinct from every concrete value.

use crate::model::{BookRecord, MANAGED_KEYS};
use serde_yaml::{Mapping, Value};

/// One changed header field: the value currently in the note and the
/// value the candidate record wants. `None` means absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// Compare `candidate` against `existing`, returning changes in schema
/// field order. An empty result means the note needs no write.
pub fn diff_header(existing: &Mapping, candidate: &BookRecord) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    for field in MANAGED_KEYS {
        let new = candidate.field_value(field);
        let old = existing
            .get(&Value::String(field.to_string()))
            .cloned()
            .filter(|v| !v.is_null());
        if old != new {
            changes.push(FieldChange { field, old, new });
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::record_to_header;

    fn record() -> BookRecord {
        BookRecord {
            item_id: "1000000000".to_string(),
            title: "タイトル".to_string(),
            author: Some("著者A".to_string()),
            isbn13: None,
            publisher: None,
            publish_year: None,
            status: Some("積読".to_string()),
            rating: None,
        }
    }

    #[test]
    fn identical_header_yields_empty_diff() {
        let record = record();
        let header = record_to_header(&record);
        assert!(diff_header(&header, &record).is_empty());
    }

    #[test]
    fn value_change_is_reported_with_old_and_new() {
        let mut candidate = record();
        candidate.status = Some("読み終わった".to_string());
        let header = record_to_header(&record());

        let changes = diff_header(&header, &candidate);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "status");
        assert_eq!(changes[0].old, Some(Value::String("積読".into())));
        assert_eq!(changes[0].new, Some(Value::String("読み終わった".into())));
    }

    #[test]
    fn absent_to_concrete_is_a_change() {
        let mut candidate = record();
        candidate.rating = Some(5);
        let header = record_to_header(&record());

        let changes = diff_header(&header, &candidate);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "rating");
        assert_eq!(changes[0].old, None);
    }

    #[test]
    fn concrete_to_absent_is_a_change() {
        let mut existing = record();
        existing.rating = Some(5);
        let header = record_to_header(&existing);

        let changes = diff_header(&header, &record());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "rating");
        assert_eq!(changes[0].new, None);
    }

    #[test]
    fn explicit_null_equals_absent() {
        let mut header = record_to_header(&record());
        header.insert(Value::String("rating".into()), Value::Null);
        assert!(diff_header(&header, &record()).is_empty());
    }

    #[test]
    fn unknown_keys_are_never_reported() {
        let mut header = record_to_header(&record());
        header.insert(
            Value::String("tags".into()),
            Value::String("novel".into()),
        );
        assert!(diff_header(&header, &record()).is_empty());
    }

    #[test]
    fn change_order_follows_the_schema() {
        let mut candidate = record();
        candidate.rating = Some(4);
        candidate.author = Some("著者B".to_string());
        candidate.status = Some("読み終わった".to_string());
        let header = record_to_header(&record());

        let fields: Vec<&str> = diff_header(&header, &candidate)
            .iter()
            .map(|c| c.field)
            .collect();
        assert_eq!(fields, vec!["author", "status", "rating"]);
    }

    #[test]
    fn empty_header_reports_every_present_field() {
        let candidate = record();
        let changes = diff_header(&Mapping::new(), &candidate);
        let fields: Vec<&str> = changes.iter().map(|c| c.field).collect();
        // absent candidate fields stay absent, so no change for them
        assert_eq!(fields, vec!["item_id", "title", "author", "status"]);
        assert!(changes.iter().all(|c| c.old.is_none()));
    }
}
