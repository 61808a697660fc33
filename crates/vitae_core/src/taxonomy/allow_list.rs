//! Generator field allow-lists.
//!
//! This table mirrors the external generator's accepted schema and is
//! maintained by hand. A stale row silently drops fields from exported
//! output; it never fails the export.

use super::classifier::EntryKind;

const EXPERIENCE_FIELDS: &[&str] = &[
    "company",
    "position",
    "location",
    "start_date",
    "end_date",
    "date",
    "summary",
    "highlights",
];

const EDUCATION_FIELDS: &[&str] = &[
    "institution",
    "area",
    "degree",
    "location",
    "start_date",
    "end_date",
    "date",
    "summary",
    "highlights",
];

const NORMAL_FIELDS: &[&str] = &[
    "name",
    "location",
    "start_date",
    "end_date",
    "date",
    "summary",
    "highlights",
];

const ONE_LINE_FIELDS: &[&str] = &["label", "details"];

const PUBLICATION_FIELDS: &[&str] = &["title", "authors", "doi", "url", "journal", "date"];

const IDENTITY_FIELDS: &[&str] = &[
    "name",
    "label",
    "location",
    "email",
    "phone",
    "website",
    "social_networks",
];

/// Returns the accepted field names for `kind`.
///
/// `None` means the kind has no allow-list and passes through unchanged
/// (`Text`, `Unknown`).
pub fn allowed_fields(kind: EntryKind) -> Option<&'static [&'static str]> {
    match kind {
        EntryKind::Experience => Some(EXPERIENCE_FIELDS),
        EntryKind::Education => Some(EDUCATION_FIELDS),
        EntryKind::Normal => Some(NORMAL_FIELDS),
        EntryKind::OneLine => Some(ONE_LINE_FIELDS),
        EntryKind::Publication => Some(PUBLICATION_FIELDS),
        EntryKind::Text | EntryKind::Unknown => None,
    }
}

/// Returns the accepted identity-level field names.
pub fn identity_fields() -> &'static [&'static str] {
    IDENTITY_FIELDS
}
