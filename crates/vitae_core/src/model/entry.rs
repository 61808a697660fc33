//! Typed entry shapes parsed from raw collection values.
//!
//! # Responsibility
//! - Turn a classified [`RawEntry`] into one exhaustive [`Entry`] variant.
//! - Keep author-defined extension fields next to the canonical ones.
//!
//! # Invariants
//! - Parsing never fails and never changes the tag: `Entry::parse(raw).kind()`
//!   equals `classify(raw)`.
//! - Canonical fields are normalized before typed decoding. Numbers become
//!   text, a bare scalar list field becomes a one-element list, and optional
//!   fields of the wrong type move into `extra` under their own key.

use crate::model::document::RawEntry;
use crate::taxonomy::classifier::{classify, EntryKind};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exhaustive entry sum type consumed by renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Text(String),
    OneLine(OneLineEntry),
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Normal(NormalEntry),
    Publication(PublicationEntry),
    /// Unrecognized structure, rendered as a raw key/value dump.
    Unknown(Map<String, Value>),
}

impl Entry {
    /// Parses one raw entry using the shared classifier.
    pub fn parse(raw: &RawEntry) -> Entry {
        let kind = classify(raw);
        let map = match raw {
            RawEntry::Text(text) => return Entry::Text(text.clone()),
            RawEntry::Object(map) => map,
        };

        let (normalized, displaced) = normalize(map, field_shapes(kind));
        let parsed = match kind {
            EntryKind::Text | EntryKind::Unknown => return Entry::Unknown(map.clone()),
            EntryKind::Experience => decode(normalized).map(|mut entry: ExperienceEntry| {
                entry.extra.extend(displaced);
                Entry::Experience(entry)
            }),
            EntryKind::Education => decode(normalized).map(|mut entry: EducationEntry| {
                entry.extra.extend(displaced);
                Entry::Education(entry)
            }),
            EntryKind::Publication => decode(normalized).map(|mut entry: PublicationEntry| {
                entry.extra.extend(displaced);
                Entry::Publication(entry)
            }),
            EntryKind::OneLine => decode(normalized).map(|mut entry: OneLineEntry| {
                entry.extra.extend(displaced);
                Entry::OneLine(entry)
            }),
            EntryKind::Normal => decode(normalized).map(|mut entry: NormalEntry| {
                entry.extra.extend(displaced);
                Entry::Normal(entry)
            }),
        };

        parsed.unwrap_or_else(|err| {
            warn!(
                "event=entry_parse module=model status=fallback kind={} error={}",
                kind.as_str(),
                err
            );
            Entry::Unknown(map.clone())
        })
    }

    /// Returns the tag of the parsed variant.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Text(_) => EntryKind::Text,
            Self::OneLine(_) => EntryKind::OneLine,
            Self::Experience(_) => EntryKind::Experience,
            Self::Education(_) => EntryKind::Education,
            Self::Normal(_) => EntryKind::Normal,
            Self::Publication(_) => EntryKind::Publication,
            Self::Unknown(_) => EntryKind::Unknown,
        }
    }

    /// Short heading used by search hits and timeline events.
    pub fn title(&self) -> String {
        match self {
            Self::Text(text) => truncate_chars(text, TITLE_MAX_CHARS),
            Self::OneLine(entry) => entry.label.clone(),
            Self::Experience(entry) => entry.position.clone(),
            Self::Education(entry) => match entry.degree.as_deref() {
                Some(degree) => format!("{degree} in {}", entry.area),
                None => entry.area.clone(),
            },
            Self::Normal(entry) => entry.name.clone(),
            Self::Publication(entry) => entry.title.clone(),
            Self::Unknown(map) => map
                .values()
                .find_map(Value::as_str)
                .map(|text| truncate_chars(text, TITLE_MAX_CHARS))
                .unwrap_or_else(|| UNTITLED.to_string()),
        }
    }

    /// Secondary heading: employer, institution, venue or location.
    pub fn subtitle(&self) -> Option<String> {
        match self {
            Self::Experience(entry) => Some(entry.company.clone()),
            Self::Education(entry) => Some(entry.institution.clone()),
            Self::Normal(entry) => entry.location.clone(),
            Self::Publication(entry) => entry.journal.clone(),
            Self::Text(_) | Self::OneLine(_) | Self::Unknown(_) => None,
        }
    }
}

const TITLE_MAX_CHARS: usize = 60;
const UNTITLED: &str = "(untitled entry)";

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut truncated = value.chars().take(max_chars).collect::<String>();
    if value.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

fn decode<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(map))
}

/// JSON shape a canonical field is coerced into before typed decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldShape {
    /// Signature field the classifier keyed on; always coerced to text.
    Key,
    Text,
    List,
    Flag,
}

use FieldShape::{Flag, Key, List, Text};

const ONE_LINE_FIELDS: &[(&str, FieldShape)] = &[("label", Key), ("details", Key)];

const EXPERIENCE_FIELDS: &[(&str, FieldShape)] = &[
    ("company", Key),
    ("position", Key),
    ("location", Text),
    ("start_date", Text),
    ("end_date", Text),
    ("date", Text),
    ("summary", Text),
    ("highlights", List),
];

const EDUCATION_FIELDS: &[(&str, FieldShape)] = &[
    ("institution", Key),
    ("area", Key),
    ("degree", Text),
    ("location", Text),
    ("start_date", Text),
    ("end_date", Text),
    ("date", Text),
    ("summary", Text),
    ("highlights", List),
];

const NORMAL_FIELDS: &[(&str, FieldShape)] = &[
    ("name", Key),
    ("location", Text),
    ("start_date", Text),
    ("end_date", Text),
    ("date", Text),
    ("summary", Text),
    ("highlights", List),
    ("show", Flag),
];

const PUBLICATION_FIELDS: &[(&str, FieldShape)] = &[
    ("title", Key),
    ("authors", List),
    ("date", Text),
    ("journal", Text),
    ("doi", Text),
    ("url", Text),
];

fn field_shapes(kind: EntryKind) -> &'static [(&'static str, FieldShape)] {
    match kind {
        EntryKind::OneLine => ONE_LINE_FIELDS,
        EntryKind::Experience => EXPERIENCE_FIELDS,
        EntryKind::Education => EDUCATION_FIELDS,
        EntryKind::Normal => NORMAL_FIELDS,
        EntryKind::Publication => PUBLICATION_FIELDS,
        EntryKind::Text | EntryKind::Unknown => &[],
    }
}

/// Returns the map with canonical fields coerced to their shapes, plus the
/// fields that could not be coerced, keyed as they were in the source.
fn normalize(
    map: &Map<String, Value>,
    shapes: &[(&str, FieldShape)],
) -> (Map<String, Value>, Map<String, Value>) {
    let mut normalized = map.clone();
    let mut displaced = Map::new();
    for &(field, shape) in shapes {
        let Some(value) = normalized.remove(field) else {
            continue;
        };
        let coerced = match shape {
            Key => Some(Value::String(text_of(&value))),
            Text => match value {
                Value::Null => continue,
                Value::String(_) => Some(value.clone()),
                Value::Number(ref number) => Some(Value::String(number.to_string())),
                _ => None,
            },
            List => list_of(&value).map(|items| {
                Value::Array(items.into_iter().map(Value::String).collect())
            }),
            Flag => match value {
                Value::Null => continue,
                Value::Bool(_) => Some(value.clone()),
                _ => None,
            },
        };
        match coerced {
            Some(coerced) => {
                normalized.insert(field.to_string(), coerced);
            }
            None => {
                debug!("event=entry_parse module=model status=displaced field={field}");
                displaced.insert(field.to_string(), value);
            }
        }
    }
    (normalized, displaced)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn text_of(value: &Value) -> String {
    if let Some(text) = scalar_text(value) {
        return text;
    }
    match value {
        Value::Null => String::new(),
        Value::Array(items) if items.iter().all(|item| scalar_text(item).is_some()) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// A bare scalar is a one-element list; arrays keep their scalar items and
/// skip nulls. Nested structures do not fit and return `None`.
fn list_of(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(scalar_text)
            .collect(),
        scalar => scalar_text(scalar).map(|text| vec![text]),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneLineEntry {
    pub label: String,
    pub details: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub area: String,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic named item: projects, certifications, awards and the like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalEntry {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    /// `false` hides the entry from generator export only.
    #[serde(default)]
    pub show: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationEntry {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
