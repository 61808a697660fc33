//! Generator collaborator seam.

use super::generator::GeneratorDocument;
use super::{ExportError, ExportResult};
use log::{error, info};
use std::path::{Path, PathBuf};

/// Receives the projected document on behalf of the external generator.
pub trait GeneratorSink {
    /// Stable sink id used in logs.
    fn sink_id(&self) -> &str;
    fn accept(&mut self, document: &GeneratorDocument) -> ExportResult<()>;
}

/// Writes the projected document as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GeneratorSink for JsonFileSink {
    fn sink_id(&self) -> &str {
        "json_file"
    }

    fn accept(&mut self, document: &GeneratorDocument) -> ExportResult<()> {
        let mut payload = serde_json::to_string_pretty(document)?;
        payload.push('\n');

        if let Err(err) = std::fs::write(&self.path, payload.as_bytes()) {
            error!(
                "event=export_write module=export status=error sink={} error={}",
                self.sink_id(),
                err
            );
            return Err(ExportError::Io {
                path: self.path.clone(),
                source: err,
            });
        }

        info!(
            "event=export_write module=export status=ok sink={} bytes={}",
            self.sink_id(),
            payload.len()
        );
        Ok(())
    }
}
