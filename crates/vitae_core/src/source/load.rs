//! Document decoding from JSON text or file.
//!
//! # Side effects
//! - Emits `document_load` logging events with duration and status.

use super::{LoadError, LoadResult};
use crate::model::document::Document;
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Reads and decodes a document file.
pub fn load_document(path: impl AsRef<Path>) -> LoadResult<Document> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=document_load module=source status=start mode=file");

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            error!(
                "event=document_load module=source status=error mode=file duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    decode(&text, "file", started_at)
}

/// Decodes a document from JSON text.
pub fn parse_document(text: &str) -> LoadResult<Document> {
    let started_at = Instant::now();
    info!("event=document_load module=source status=start mode=text");
    decode(text, "text", started_at)
}

fn decode(text: &str, mode: &str, started_at: Instant) -> LoadResult<Document> {
    match serde_json::from_str::<Document>(text)
        .map_err(LoadError::from)
        .and_then(validate)
    {
        Ok(document) => {
            info!(
                "event=document_load module=source status=ok mode={} duration_ms={} collections={} entries={}",
                mode,
                started_at.elapsed().as_millis(),
                document.collections.len(),
                document
                    .collections
                    .iter()
                    .map(|c| c.entries.len())
                    .sum::<usize>()
            );
            Ok(document)
        }
        Err(err) => {
            error!(
                "event=document_load module=source status=error mode={} duration_ms={} error_code=decode_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn validate(document: Document) -> LoadResult<Document> {
    if document.identity.name.trim().is_empty() {
        return Err(LoadError::InvalidShape(
            "identity `name` cannot be blank".to_string(),
        ));
    }
    Ok(document)
}
