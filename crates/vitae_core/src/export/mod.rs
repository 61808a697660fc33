//! Generator-facing export.
//!
//! # Responsibility
//! - Derive the reduced document accepted by the external layout generator.
//! - Hand that document to a [`GeneratorSink`] collaborator.
//!
//! # Invariants
//! - Every exported entry passed through the allow-list projector.
//! - Entries with `show: false` are excluded.
//! - Collections left without entries are omitted, never emitted empty.
//! - The source document is never mutated.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod generator;
pub mod sink;

pub use generator::{export_document, CollectionSummary, ExportSummary, GeneratorDocument};
pub use sink::{GeneratorSink, JsonFileSink};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize generator document: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
