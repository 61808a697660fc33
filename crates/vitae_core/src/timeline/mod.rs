//! Cross-collection timeline.
//!
//! # Responsibility
//! - Normalize heterogeneous date strings into comparable dates.
//! - Merge dated entries from education, employment, projects and
//!   publications into one oldest-to-newest sequence.
//!
//! # Invariants
//! - Date parsing never fails; unparseable input yields a fallback date plus
//!   a diagnostic.
//! - Timeline construction never aborts on bad dates.

pub mod builder;
pub mod date_parser;
