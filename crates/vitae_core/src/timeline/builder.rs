//! Timeline builder.
//!
//! # Responsibility
//! - Gather dated entries from education, experience, a bounded slice of
//!   projects, and publications.
//! - Derive ongoing/completed status and a deterministic order.
//!
//! # Invariants
//! - Ongoing events sort before completed ones, then the sequence is reversed
//!   once, so consumers read oldest to newest with ongoing events last.
//! - Ties fall back to gather order (`sequence`), making the order total.
//! - Counters count whole collections, not just the bounded project slice.

use crate::model::document::{
    Document, RawEntry, COLLECTION_EDUCATION, COLLECTION_EXPERIENCE,
    COLLECTION_PERSONAL_PROJECTS, COLLECTION_PROJECTS, COLLECTION_PUBLICATIONS,
};
use crate::model::entry::Entry;
use crate::timeline::date_parser::{split_range, DateParser, ParsedDate};
use chrono::NaiveDate;
use log::{debug, info};
use std::cmp::Ordering;

/// Default number of project entries admitted to the timeline.
pub const DEFAULT_PROJECT_LIMIT: usize = 3;

/// Timeline build options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Maximum project entries taken from `projects` then `personal_projects`.
    pub project_limit: usize,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            project_limit: DEFAULT_PROJECT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCategory {
    Education,
    Work,
    Project,
    Publication,
}

impl TimelineCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Work => "work",
            Self::Project => "project",
            Self::Publication => "publication",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Ongoing,
    Completed,
}

/// One dated entry on the merged timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    pub category: TimelineCategory,
    /// Source collection name.
    pub collection: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub start: NaiveDate,
    /// `None` for ongoing events and for point events.
    pub end: Option<NaiveDate>,
    pub status: EventStatus,
    /// Gather position, used as the final tie-break.
    pub sequence: usize,
}

impl TimelineEvent {
    /// Date used to order completed events: end, falling back to start.
    pub fn concluded_on(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == EventStatus::Ongoing
    }
}

/// Whole-collection counters reported alongside the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineCounters {
    pub employment: usize,
    pub education: usize,
    /// `projects` plus `personal_projects`.
    pub projects: usize,
    pub publications: usize,
}

/// Date fallback recorded for later audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDiagnostic {
    pub collection: String,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Oldest to newest; ongoing events last.
    pub events: Vec<TimelineEvent>,
    pub counters: TimelineCounters,
    pub diagnostics: Vec<DateDiagnostic>,
}

/// Builds the merged timeline from one document snapshot.
pub fn build_timeline(
    document: &Document,
    parser: &DateParser,
    options: &TimelineOptions,
) -> Timeline {
    let projects = document
        .entries(COLLECTION_PROJECTS)
        .iter()
        .map(|entry| (COLLECTION_PROJECTS, entry))
        .chain(
            document
                .entries(COLLECTION_PERSONAL_PROJECTS)
                .iter()
                .map(|entry| (COLLECTION_PERSONAL_PROJECTS, entry)),
        )
        .take(options.project_limit);

    let sources = tagged(document, COLLECTION_EDUCATION, TimelineCategory::Education)
        .chain(tagged(document, COLLECTION_EXPERIENCE, TimelineCategory::Work))
        .chain(projects.map(|(name, entry)| (TimelineCategory::Project, name, entry)))
        .chain(tagged(
            document,
            COLLECTION_PUBLICATIONS,
            TimelineCategory::Publication,
        ));

    let mut events = Vec::new();
    let mut diagnostics = Vec::new();
    for (sequence, (category, collection, entry)) in sources.enumerate() {
        match event_from_entry(parser, category, collection, entry, sequence) {
            Some((event, mut entry_diagnostics)) => {
                events.push(event);
                diagnostics.append(&mut entry_diagnostics);
            }
            None => debug!(
                "event=timeline_skip module=timeline status=skipped collection={} reason=no_date",
                collection
            ),
        }
    }

    events.sort_by(order_events);
    events.reverse();

    let counters = TimelineCounters {
        employment: document.entries(COLLECTION_EXPERIENCE).len(),
        education: document.entries(COLLECTION_EDUCATION).len(),
        projects: document.entries(COLLECTION_PROJECTS).len()
            + document.entries(COLLECTION_PERSONAL_PROJECTS).len(),
        publications: document.entries(COLLECTION_PUBLICATIONS).len(),
    };

    info!(
        "event=timeline_build module=timeline status=ok events={} diagnostics={}",
        events.len(),
        diagnostics.len()
    );

    Timeline {
        events,
        counters,
        diagnostics,
    }
}

fn tagged<'a>(
    document: &'a Document,
    collection: &'static str,
    category: TimelineCategory,
) -> impl Iterator<Item = (TimelineCategory, &'static str, &'a RawEntry)> + 'a {
    document
        .entries(collection)
        .iter()
        .map(move |entry| (category, collection, entry))
}

fn event_from_entry(
    parser: &DateParser,
    category: TimelineCategory,
    collection: &str,
    entry: &RawEntry,
    sequence: usize,
) -> Option<(TimelineEvent, Vec<DateDiagnostic>)> {
    // `start_date` entries are open-ended until an end is given; a bare
    // `date` is a point in time unless it spells out a range.
    // Why: authors leave `end_date` off a current role rather than writing
    // "present", while a lone `date` is how awards and talks are stamped.
    let (start_text, end_text, open_ended) =
        match (entry.text_field("start_date"), entry.text_field("date")) {
            (Some(start), _) => (start, entry.text_field("end_date"), true),
            (None, Some(date)) => {
                let range = split_range(&date)
                    .map(|(start, end)| (start.to_string(), end.to_string()));
                match range {
                    Some((start, end)) => (start, Some(end), true),
                    None => (date, entry.text_field("end_date"), false),
                }
            }
            (None, None) => return None,
        };

    let parsed = Entry::parse(entry);
    let title = parsed.title();
    let start = parser.parse(&start_text);
    let end = end_text.as_deref().map(|text| parser.parse(text));

    let ongoing = match &end {
        Some(end) => end.is_ongoing(),
        None => open_ended || start.is_ongoing(),
    };

    let diagnostics = [Some(&start), end.as_ref()]
        .into_iter()
        .flatten()
        .filter_map(|date: &ParsedDate| date.diagnostic.clone())
        .map(|message| DateDiagnostic {
            collection: collection.to_string(),
            title: title.clone(),
            message,
        })
        .collect();

    let event = TimelineEvent {
        category,
        collection: collection.to_string(),
        subtitle: parsed.subtitle(),
        title,
        start: start.date,
        end: if ongoing { None } else { end.map(|end| end.date) },
        status: if ongoing {
            EventStatus::Ongoing
        } else {
            EventStatus::Completed
        },
        sequence,
    };
    Some((event, diagnostics))
}

fn order_events(a: &TimelineEvent, b: &TimelineEvent) -> Ordering {
    let primary = match (a.status, b.status) {
        (EventStatus::Ongoing, EventStatus::Completed) => Ordering::Less,
        (EventStatus::Completed, EventStatus::Ongoing) => Ordering::Greater,
        (EventStatus::Ongoing, EventStatus::Ongoing) => b.start.cmp(&a.start),
        (EventStatus::Completed, EventStatus::Completed) => {
            b.concluded_on().cmp(&a.concluded_on())
        }
    };
    primary.then(a.sequence.cmp(&b.sequence))
}

#[cfg(test)]
mod tests {
    use super::{build_timeline, EventStatus, TimelineOptions};
    use crate::model::document::Document;
    use crate::timeline::date_parser::DateParser;
    use chrono::{Datelike, NaiveDate};
    use serde_json::json;

    fn parser() -> DateParser {
        DateParser::new(NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid today"))
    }

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).expect("document should decode")
    }

    #[test]
    fn ongoing_event_reads_after_completed_event() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "experience": [
                    {"company": "Now Corp", "position": "Lead", "start_date": "2023-01"},
                    {"company": "Then Inc", "position": "Dev", "start_date": "2020-01", "end_date": "2022-05"}
                ]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        let titles: Vec<_> = timeline.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Dev", "Lead"]);
        assert_eq!(timeline.events[1].status, EventStatus::Ongoing);
        assert_eq!(timeline.events[0].status, EventStatus::Completed);
    }

    #[test]
    fn completed_events_order_by_end_then_start() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "publications": [
                    {"title": "Late", "authors": ["A"], "date": "2021-09"}
                ],
                "education": [
                    {"institution": "Uni", "area": "CS", "start_date": "2015", "end_date": "2019"}
                ]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        let years: Vec<_> = timeline
            .events
            .iter()
            .map(|e| e.concluded_on().year())
            .collect();
        assert_eq!(years, vec![2019, 2021]);
    }

    #[test]
    fn project_slice_is_bounded_but_counted_in_full() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "projects": [
                    {"name": "P1", "date": "2019"},
                    {"name": "P2", "date": "2020"}
                ],
                "personal_projects": [
                    {"name": "S1", "date": "2021"},
                    {"name": "S2", "date": "2022"}
                ]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions { project_limit: 3 });
        assert_eq!(timeline.events.len(), 3);
        assert!(timeline.events.iter().all(|e| e.title != "S2"));
        assert_eq!(timeline.counters.projects, 4);
    }

    #[test]
    fn bad_dates_are_diagnosed_not_fatal() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "experience": [
                    {"company": "X", "position": "Y", "start_date": "someday", "end_date": "2020"}
                ]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        assert_eq!(timeline.events.len(), 1);
        assert_eq!(timeline.diagnostics.len(), 1);
        assert_eq!(timeline.diagnostics[0].collection, "experience");
    }

    #[test]
    fn date_range_with_present_is_ongoing() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "projects": [{"name": "OSS", "date": "2021 \u{2013} present"}]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        let event = &timeline.events[0];
        assert!(event.is_ongoing());
        assert_eq!(event.start.year(), 2021);
    }

    #[test]
    fn same_start_ongoing_events_keep_gather_order_reversed() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "experience": [
                    {"company": "A", "position": "First", "start_date": "2023-04"},
                    {"company": "B", "position": "Second", "start_date": "2023-04"}
                ]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        let titles: Vec<_> = timeline.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[test]
    fn lone_date_is_a_point_but_lone_start_stays_open() {
        let document = document(json!({
            "name": "Ada",
            "sections": {
                "projects": [
                    {"name": "Talk", "date": "2019-06"},
                    {"name": "Library", "start_date": "2019-06"}
                ]
            }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        let status = |title: &str| {
            timeline
                .events
                .iter()
                .find(|event| event.title == title)
                .map(|event| (event.status, event.end))
        };
        assert_eq!(status("Talk"), Some((EventStatus::Completed, None)));
        assert_eq!(status("Library"), Some((EventStatus::Ongoing, None)));
    }

    #[test]
    fn undated_entries_are_skipped() {
        let document = document(json!({
            "name": "Ada",
            "sections": { "projects": [{"name": "No date"}] }
        }));

        let timeline = build_timeline(&document, &parser(), &TimelineOptions::default());
        assert!(timeline.events.is_empty());
        assert_eq!(timeline.counters.projects, 1);
    }
}
