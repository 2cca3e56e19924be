use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Frontmatter keys managed by the sync tool, in serialization order.
///
/// Every key in this list belongs to the tool: it may be created, updated,
/// or nulled out by a sync run. Any other key found in a note's header is
/// user territory and survives a merge untouched.
pub const MANAGED_KEYS: [&str; 8] = [
    "item_id",
    "title",
    "author",
    "isbn13",
    "publisher",
    "publish_year",
    "status",
    "rating",
];

/// One book, normalized from a CSV row.
///
/// `item_id` is the stable identifier used to match rows to existing notes
/// across runs. Everything else is optional; an absent field is distinct
/// from an empty string, and a missing rating is distinct from rating 0.
/// `publish_year` stays a string on purpose — it is an opaque token, never
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub item_id: String,
    pub title: String,
    pub author: Option<String>,
    pub isbn13: Option<String>,
    pub publisher: Option<String>,
    pub publish_year: Option<String>,
    pub status: Option<String>,
    pub rating: Option<u32>,
}

impl BookRecord {
    /// The YAML value for a managed field, or `None` when the field is
    /// absent from this record. Keys outside [`MANAGED_KEYS`] yield `None`.
    pub fn field_value(&self, key: &str) -> Option<Value> {
        match key {
            "item_id" => Some(Value::String(self.item_id.clone())),
            "title" => Some(Value::String(self.title.clone())),
            "author" => self.author.clone().map(Value::String),
            "isbn13" => self.isbn13.clone().map(Value::String),
            "publisher" => self.publisher.clone().map(Value::String),
            "publish_year" => self.publish_year.clone().map(Value::String),
            "status" => self.status.clone().map(Value::String),
            "rating" => self
                .rating
                .map(|r| Value::Number(serde_yaml::Number::from(u64::from(r)))),
            _ => None,
        }
    }
}

/// What the writer did with one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    Unchanged,
}

impl SyncOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncOutcome::Created => "created",
            SyncOutcome::Updated => "updated",
            SyncOutcome::Unchanged => "unchanged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BookRecord {
        BookRecord {
            item_id: "1000000000".to_string(),
            title: "テストタイトル".to_string(),
            author: Some("テスト作者名".to_string()),
            isbn13: None,
            publisher: None,
            publish_year: None,
            status: None,
            rating: Some(5),
        }
    }

    #[test]
    fn field_value_distinguishes_absent_from_zero() {
        let mut r = record();
        assert_eq!(
            r.field_value("rating"),
            Some(Value::Number(serde_yaml::Number::from(5u64)))
        );
        r.rating = Some(0);
        assert_eq!(
            r.field_value("rating"),
            Some(Value::Number(serde_yaml::Number::from(0u64)))
        );
        r.rating = None;
        assert_eq!(r.field_value("rating"), None);
    }

    #[test]
    fn field_value_ignores_unmanaged_keys() {
        assert_eq!(record().field_value("tags"), None);
    }
}
