//! Core domain logic for the vitae document toolkit.
//! This crate is the single source of truth for entry taxonomy, command
//! availability and derived views.

pub mod command;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod render;
pub mod search;
pub mod service;
pub mod source;
pub mod taxonomy;
pub mod timeline;

pub use command::catalog::{CommandCategory, CommandSpec, CommandTarget};
pub use command::registry::{CommandRegistry, RegistryError, Resolution, ShadowedCollection};
pub use config::SessionConfig;
pub use export::{
    export_document, ExportError, ExportResult, ExportSummary, GeneratorDocument, GeneratorSink,
    JsonFileSink,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::document::{Collection, Collections, Document, Identity, RawEntry};
pub use model::entry::Entry;
pub use render::{RenderedBlock, RenderedLink};
pub use search::scan::{search, HighlightStyle, SearchHit, SearchOutcome};
pub use service::session::{CommandOutput, OutputStatus, Session};
pub use source::{load_document, parse_document, LoadError, LoadResult};
pub use taxonomy::classifier::{classify, EntryKind};
pub use taxonomy::projector::project;
pub use timeline::builder::{build_timeline, Timeline, TimelineEvent, TimelineOptions};
pub use timeline::date_parser::{DateParser, DateStatus, ParsedDate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
