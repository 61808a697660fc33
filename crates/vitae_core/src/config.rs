//! Session configuration.
//!
//! # Responsibility
//! - Hold tunables shared by derived views (timeline, search).
//! - Provide deterministic defaults; callers override fields as needed.

use crate::search::scan::HighlightStyle;
use crate::timeline::builder::{TimelineOptions, DEFAULT_PROJECT_LIMIT};
use crate::timeline::date_parser::DateParser;
use chrono::NaiveDate;

/// Tunables for one interactive session or build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum project entries admitted to the timeline.
    pub timeline_project_limit: usize,
    /// Markers wrapped around search matches.
    pub highlight: HighlightStyle,
    /// Fixed "today" for date parsing; `None` means the current UTC date.
    pub today: Option<NaiveDate>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeline_project_limit: DEFAULT_PROJECT_LIMIT,
            highlight: HighlightStyle::default(),
            today: None,
        }
    }
}

impl SessionConfig {
    /// Date parser anchored to the configured or current date.
    pub fn date_parser(&self) -> DateParser {
        match self.today {
            Some(today) => DateParser::new(today),
            None => DateParser::default(),
        }
    }

    pub fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            project_limit: self.timeline_project_limit,
        }
    }
}
