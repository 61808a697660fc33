//! Projection of the whole document for the external generator.

use super::ExportResult;
use crate::model::document::{Collection, Collections, Document};
use crate::taxonomy::allow_list::identity_fields;
use crate::taxonomy::classifier::classify;
use crate::taxonomy::projector::{project, project_map};
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

/// Generator input: `{"cv": {<identity>, "sections": {...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorDocument {
    pub cv: GeneratorCv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorCv {
    #[serde(flatten)]
    pub identity: Map<String, Value>,
    pub sections: Collections,
}

/// Per-collection export accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub name: String,
    /// Entries exported after projection.
    pub kept: usize,
    /// Entries excluded by `show: false`.
    pub hidden: usize,
}

impl CollectionSummary {
    /// Whether the collection was omitted from the export.
    pub fn omitted(&self) -> bool {
        self.kept == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub collections: Vec<CollectionSummary>,
}

impl ExportSummary {
    pub fn kept_entries(&self) -> usize {
        self.collections.iter().map(|c| c.kept).sum()
    }

    pub fn omitted_collections(&self) -> Vec<&str> {
        self.collections
            .iter()
            .filter(|c| c.omitted())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Builds the projected generator document.
///
/// # Errors
/// - Returns [`super::ExportError::Serialize`] if identity fields cannot be
///   represented as JSON.
pub fn export_document(document: &Document) -> ExportResult<(GeneratorDocument, ExportSummary)> {
    let identity = match serde_json::to_value(&document.identity)? {
        Value::Object(map) => project_map(&map, identity_fields()),
        _ => Map::new(),
    };

    let mut sections = Collections::new();
    let mut summary = ExportSummary::default();
    for collection in &document.collections {
        let (visible, hidden): (Vec<_>, Vec<_>) =
            collection.entries.iter().partition(|entry| !entry.is_hidden());
        let entries: Vec<_> = visible
            .into_iter()
            .map(|entry| project(entry, classify(entry)))
            .collect();

        summary.collections.push(CollectionSummary {
            name: collection.name.clone(),
            kept: entries.len(),
            hidden: hidden.len(),
        });
        if !entries.is_empty() {
            sections.insert(Collection::new(collection.name.clone(), entries));
        }
    }

    info!(
        "event=export_project module=export status=ok collections={} entries={} omitted={}",
        sections.len(),
        summary.kept_entries(),
        summary.omitted_collections().len()
    );

    Ok((
        GeneratorDocument {
            cv: GeneratorCv { identity, sections },
        },
        summary,
    ))
}
