//! Linear-scan search and highlight.
//!
//! # Invariants
//! - Blank terms yield usage guidance, never an empty match list.
//! - One entry contributes at most one hit, listing every matching field.
//! - Snippets keep the original casing; only the markers are inserted.
//! - Hits follow collection order, then entry order.

use crate::model::document::{Document, RawEntry};
use crate::model::entry::Entry;
use crate::taxonomy::classifier::{classify, EntryKind};
use log::{info, warn};
use regex::{Captures, Regex, RegexBuilder};
use serde_json::Value;

/// Guidance returned for blank search terms.
pub const SEARCH_USAGE: &str =
    "usage: search <term>  (case-insensitive; scans every section of the document)";

const TEXT_FIELD: &str = "text";

/// Markers wrapped around each matched occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub open: String,
    pub close: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            open: "[".to_string(),
            close: "]".to_string(),
        }
    }
}

/// One matching field of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedSnippet {
    /// Field path, e.g. `position`, `highlights[1]`, `links.repo`.
    pub field: String,
    pub snippet: String,
}

/// One matching entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Collection name the entry belongs to.
    pub category: String,
    pub title: String,
    pub kind: EntryKind,
    pub snippets: Vec<MatchedSnippet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The term was blank; carries guidance text.
    Usage(String),
    /// Zero or more hits for a non-blank term.
    Matches { term: String, hits: Vec<SearchHit> },
}

/// Scans every collection for `term`.
pub fn search(document: &Document, term: &str, style: &HighlightStyle) -> SearchOutcome {
    let term = term.trim();
    if term.is_empty() {
        return SearchOutcome::Usage(SEARCH_USAGE.to_string());
    }

    let matcher = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(matcher) => matcher,
        Err(err) => {
            warn!(
                "event=search module=search status=error term_chars={} error={}",
                term.chars().count(),
                err
            );
            return SearchOutcome::Usage(format!("search term is too long: {err}"));
        }
    };

    let mut hits = Vec::new();
    for collection in &document.collections {
        for entry in &collection.entries {
            if let Some(hit) = match_entry(&collection.name, entry, &matcher, style) {
                hits.push(hit);
            }
        }
    }

    info!(
        "event=search module=search status=ok term_chars={} hits={}",
        term.chars().count(),
        hits.len()
    );

    SearchOutcome::Matches {
        term: term.to_string(),
        hits,
    }
}

fn match_entry(
    collection: &str,
    entry: &RawEntry,
    matcher: &Regex,
    style: &HighlightStyle,
) -> Option<SearchHit> {
    let mut snippets = Vec::new();
    match entry {
        RawEntry::Text(text) => collect_text(TEXT_FIELD, text, matcher, style, &mut snippets),
        RawEntry::Object(map) => {
            for (key, value) in map {
                collect_value(key, value, matcher, style, &mut snippets);
            }
        }
    }

    if snippets.is_empty() {
        return None;
    }

    Some(SearchHit {
        category: collection.to_string(),
        title: Entry::parse(entry).title(),
        kind: classify(entry),
        snippets,
    })
}

fn collect_value(
    field: &str,
    value: &Value,
    matcher: &Regex,
    style: &HighlightStyle,
    out: &mut Vec<MatchedSnippet>,
) {
    match value {
        Value::String(text) => collect_text(field, text, matcher, style, out),
        Value::Number(number) => collect_text(field, &number.to_string(), matcher, style, out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_value(&format!("{field}[{index}]"), item, matcher, style, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                collect_value(&format!("{field}.{key}"), item, matcher, style, out);
            }
        }
        Value::Bool(_) | Value::Null => {}
    }
}

fn collect_text(
    field: &str,
    text: &str,
    matcher: &Regex,
    style: &HighlightStyle,
    out: &mut Vec<MatchedSnippet>,
) {
    if !matcher.is_match(text) {
        return;
    }
    out.push(MatchedSnippet {
        field: field.to_string(),
        snippet: highlight(text, matcher, style),
    });
}

/// Wraps every match of `matcher` in `style` markers.
pub fn highlight(text: &str, matcher: &Regex, style: &HighlightStyle) -> String {
    matcher
        .replace_all(text, |caps: &Captures<'_>| {
            format!("{}{}{}", style.open, &caps[0], style.close)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{search, HighlightStyle, SearchOutcome};
    use crate::model::document::Document;
    use serde_json::json;

    fn document() -> Document {
        serde_json::from_value(json!({
            "name": "Ada",
            "sections": {
                "intro": ["I write Rust and some RUST-adjacent tooling."],
                "projects": [
                    {"name": "Crawler", "highlights": ["rust async", "no match"], "links": {"repo": "github.com/ada/rust-crawler"}}
                ]
            }
        }))
        .expect("document should decode")
    }

    #[test]
    fn blank_term_returns_usage() {
        for term in ["", "   ", "\t"] {
            assert!(matches!(
                search(&document(), term, &HighlightStyle::default()),
                SearchOutcome::Usage(_)
            ));
        }
    }

    #[test]
    fn highlights_every_occurrence_preserving_case() {
        let SearchOutcome::Matches { hits, .. } =
            search(&document(), "rust", &HighlightStyle::default())
        else {
            panic!("expected matches");
        };
        assert_eq!(hits[0].category, "intro");
        assert_eq!(
            hits[0].snippets[0].snippet,
            "I write [Rust] and some [RUST]-adjacent tooling."
        );
    }

    #[test]
    fn aggregates_fields_into_one_hit_per_entry() {
        let SearchOutcome::Matches { hits, .. } =
            search(&document(), "rust", &HighlightStyle::default())
        else {
            panic!("expected matches");
        };
        assert_eq!(hits.len(), 2);
        let fields: Vec<_> = hits[1].snippets.iter().map(|s| s.field.as_str()).collect();
        assert_eq!(fields, vec!["highlights[0]", "links.repo"]);
        assert_eq!(hits[1].title, "Crawler");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let document: Document = serde_json::from_value(json!({
            "name": "Ada",
            "sections": { "skills": [{"label": "Languages", "details": "C++, Rust"}] }
        }))
        .expect("document should decode");

        let SearchOutcome::Matches { hits, .. } =
            search(&document, "c++", &HighlightStyle::default())
        else {
            panic!("expected matches");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snippets[0].snippet, "[C++], Rust");
    }

    #[test]
    fn no_hits_is_an_empty_match_list() {
        let outcome = search(&document(), "haskell", &HighlightStyle::default());
        assert_eq!(
            outcome,
            SearchOutcome::Matches {
                term: "haskell".to_string(),
                hits: vec![]
            }
        );
    }
}
