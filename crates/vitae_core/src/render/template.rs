//! Per-kind entry templates.

use super::RenderedBlock;
use crate::model::document::Collection;
use crate::model::entry::{
    EducationEntry, Entry, ExperienceEntry, NormalEntry, OneLineEntry, PublicationEntry,
};
use serde_json::{Map, Value};

const BULLET: &str = "  \u{2022} ";
const DETAIL: &str = "  ";
const ONGOING_LABEL: &str = "Present";
const DOI_BASE_URL: &str = "https://doi.org/";
/// Export visibility flag; not content.
const SHOW_FLAG: &str = "show";

/// Human label for a collection name: `personal_projects` -> `Personal Projects`.
pub fn collection_label(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a whole collection under its label heading.
pub fn render_collection(collection: &Collection) -> RenderedBlock {
    let mut block = RenderedBlock::new();
    block.push_line(collection_label(&collection.name));
    for raw in &collection.entries {
        block.push_blank();
        render_entry(&Entry::parse(raw), &mut block);
    }
    block
}

/// Appends one entry using the template selected by its kind.
pub fn render_entry(entry: &Entry, block: &mut RenderedBlock) {
    match entry {
        Entry::Text(text) => block.push_markup("", text),
        Entry::OneLine(entry) => render_one_line(entry, block),
        Entry::Experience(entry) => render_experience(entry, block),
        Entry::Education(entry) => render_education(entry, block),
        Entry::Normal(entry) => render_normal(entry, block),
        Entry::Publication(entry) => render_publication(entry, block),
        Entry::Unknown(map) => render_raw(map, block),
    }
}

fn render_one_line(entry: &OneLineEntry, block: &mut RenderedBlock) {
    block.push_markup("", &format!("{}: {}", entry.label, entry.details));
    render_extra(&entry.extra, block);
}

fn render_experience(entry: &ExperienceEntry, block: &mut RenderedBlock) {
    block.push_markup("", &format!("{} @ {}", entry.position, entry.company));
    push_meta(
        block,
        entry.location.as_deref(),
        period(
            entry.start_date.as_deref(),
            entry.end_date.as_deref(),
            entry.date.as_deref(),
        ),
    );
    push_body(block, entry.summary.as_deref(), &entry.highlights);
    render_extra(&entry.extra, block);
}

fn render_education(entry: &EducationEntry, block: &mut RenderedBlock) {
    let heading = match entry.degree.as_deref() {
        Some(degree) => format!("{degree} in {}, {}", entry.area, entry.institution),
        None => format!("{}, {}", entry.area, entry.institution),
    };
    block.push_markup("", &heading);
    push_meta(
        block,
        entry.location.as_deref(),
        period(
            entry.start_date.as_deref(),
            entry.end_date.as_deref(),
            entry.date.as_deref(),
        ),
    );
    push_body(block, entry.summary.as_deref(), &entry.highlights);
    render_extra(&entry.extra, block);
}

fn render_normal(entry: &NormalEntry, block: &mut RenderedBlock) {
    block.push_markup("", &entry.name);
    push_meta(
        block,
        entry.location.as_deref(),
        period(
            entry.start_date.as_deref(),
            entry.end_date.as_deref(),
            entry.date.as_deref(),
        ),
    );
    push_body(block, entry.summary.as_deref(), &entry.highlights);
    render_extra(&entry.extra, block);
}

fn render_publication(entry: &PublicationEntry, block: &mut RenderedBlock) {
    block.push_markup("", &entry.title);
    if !entry.authors.is_empty() {
        block.push_markup(DETAIL, &entry.authors.join(", "));
    }
    let venue = match (entry.journal.as_deref(), entry.date.as_deref()) {
        (Some(journal), Some(date)) => Some(format!("{journal} ({date})")),
        (Some(journal), None) => Some(journal.to_string()),
        (None, Some(date)) => Some(date.to_string()),
        (None, None) => None,
    };
    if let Some(venue) = venue {
        block.push_markup(DETAIL, &venue);
    }
    if let Some(doi) = entry.doi.as_deref() {
        let index = block.push_link(format!("doi:{doi}"), format!("{DOI_BASE_URL}{doi}"));
        block.push_line(format!("{DETAIL}doi:{doi} [{index}]"));
    }
    if let Some(url) = entry.url.as_deref() {
        let index = block.push_link(entry.title.clone(), url);
        block.push_line(format!("{DETAIL}link [{index}]"));
    }
    render_extra(&entry.extra, block);
}

fn render_raw(map: &Map<String, Value>, block: &mut RenderedBlock) {
    if map.is_empty() {
        block.push_line("(empty entry)");
        return;
    }
    for (key, value) in map {
        block.push_markup("", &format!("{key}: {}", value_text(value)));
    }
}

fn render_extra(extra: &Map<String, Value>, block: &mut RenderedBlock) {
    for (key, value) in extra.iter().filter(|(key, _)| key.as_str() != SHOW_FLAG) {
        block.push_markup(DETAIL, &format!("{key}: {}", value_text(value)));
    }
}

fn push_meta(block: &mut RenderedBlock, location: Option<&str>, period: Option<String>) {
    let line = match (location, period) {
        (Some(location), Some(period)) => format!("{location} | {period}"),
        (Some(location), None) => location.to_string(),
        (None, Some(period)) => period,
        (None, None) => return,
    };
    block.push_markup(DETAIL, &line);
}

fn push_body(block: &mut RenderedBlock, summary: Option<&str>, highlights: &[String]) {
    if let Some(summary) = summary {
        block.push_markup(DETAIL, summary);
    }
    for highlight in highlights {
        block.push_markup(BULLET, highlight);
    }
}

fn period(start: Option<&str>, end: Option<&str>, date: Option<&str>) -> Option<String> {
    match (start, end, date) {
        (Some(start), Some(end), _) => Some(format!("{start} \u{2013} {end}")),
        (Some(start), None, _) => Some(format!("{start} \u{2013} {ONGOING_LABEL}")),
        (None, _, Some(date)) => Some(date.to_string()),
        (None, Some(end), None) => Some(end.to_string()),
        (None, None, None) => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
