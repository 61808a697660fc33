//! Structural entry classifier.
//!
//! # Invariants
//! - Total: every entry maps to exactly one [`EntryKind`].
//! - First matching predicate wins; multi-field signatures are checked before
//!   the single-field `name` signature.
//! - `Unknown` is a valid result, never an error.

use crate::model::document::RawEntry;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Canonical entry shape tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    Text,
    Experience,
    Education,
    Publication,
    OneLine,
    Normal,
    Unknown,
}

impl EntryKind {
    /// Stable lowercase id used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Publication => "publication",
            Self::OneLine => "one_line",
            Self::Normal => "normal",
            Self::Unknown => "unknown",
        }
    }

    /// All tags in predicate order.
    pub fn all() -> [EntryKind; 7] {
        [
            Self::Text,
            Self::Experience,
            Self::Education,
            Self::Publication,
            Self::OneLine,
            Self::Normal,
            Self::Unknown,
        ]
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns the canonical tag for one raw entry.
pub fn classify(entry: &RawEntry) -> EntryKind {
    let map = match entry {
        RawEntry::Text(_) => return EntryKind::Text,
        RawEntry::Object(map) => map,
    };
    let has = |key: &str| map.contains_key(key);

    if has("company") && has("position") {
        EntryKind::Experience
    } else if has("institution") && has("area") {
        EntryKind::Education
    } else if has("title") && matches!(map.get("authors"), Some(Value::Array(_))) {
        EntryKind::Publication
    } else if has("label") && has("details") {
        EntryKind::OneLine
    } else if has("name") {
        EntryKind::Normal
    } else {
        EntryKind::Unknown
    }
}
