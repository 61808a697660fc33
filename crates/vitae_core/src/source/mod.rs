//! Document source loading.
//!
//! # Responsibility
//! - Read and decode the source document once per session/build.
//! - Surface load failures verbatim; they are fatal and never retried.
//!
//! # Invariants
//! - A returned [`Document`](crate::model::document::Document) has passed
//!   structural decoding (non-blank identity name, collections are entry
//!   lists).

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod load;

pub use load::{load_document, parse_document};

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// Decoded, but violates a structural rule serde cannot express.
    InvalidShape(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read document `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed document: {err}"),
            Self::InvalidShape(message) => write!(f, "invalid document: {message}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidShape(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
