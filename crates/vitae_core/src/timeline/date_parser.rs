//! Multi-format, never-failing date parser.
//!
//! Resolution order:
//! 1. ongoing markers (`present`, `current`, `ongoing`) resolve to today;
//! 2. ranges resolve to their start component;
//! 3. `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, `Mon YYYY`, `Month YYYY`, `Mon. YYYY`;
//! 4. any bare 4-digit year, anchored to January 1;
//! 5. today, with a diagnostic.

use chrono::{NaiveDate, Utc};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year-only regex"));
static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}$").expect("valid year-month regex"));
static BARE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("valid bare year regex"));

const ONGOING_MARKERS: &[&str] = &["present", "current", "ongoing"];
const RANGE_SEPARATORS: &[&str] = &["\u{2013}", "\u{2014}", " - ", " to "];

/// How a [`ParsedDate`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStatus {
    /// Explicit ongoing marker; the date is "today".
    Ongoing,
    /// One of the supported formats, or an extracted year.
    Parsed,
    /// Nothing recognizable; the date is "today" and a diagnostic is set.
    Fallback,
}

/// Normalized date with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub status: DateStatus,
    /// Set only for [`DateStatus::Fallback`].
    pub diagnostic: Option<String>,
}

impl ParsedDate {
    fn parsed(date: NaiveDate) -> Self {
        Self {
            date,
            status: DateStatus::Parsed,
            diagnostic: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == DateStatus::Ongoing
    }
}

/// Date parser anchored to a fixed "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParser {
    today: NaiveDate,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl DateParser {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Parses one date string. Never fails.
    pub fn parse(&self, raw: &str) -> ParsedDate {
        let text = raw.trim();
        let lowered = text.to_lowercase();
        if ONGOING_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            return ParsedDate {
                date: self.today,
                status: DateStatus::Ongoing,
                diagnostic: None,
            };
        }

        if let Some((start, _)) = split_range(text) {
            return self.parse(start);
        }

        if let Some(date) = parse_known_format(text) {
            return ParsedDate::parsed(date);
        }

        if let Some(date) = extract_year(text) {
            return ParsedDate::parsed(date);
        }

        let diagnostic = format!(
            "unrecognized date `{}`; using {} instead",
            text, self.today
        );
        warn!(
            "event=date_parse module=timeline status=fallback input_chars={} fallback={}",
            text.chars().count(),
            self.today
        );
        ParsedDate {
            date: self.today,
            status: DateStatus::Fallback,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Splits `2021 – 2023` style ranges into trimmed `(start, end)` parts.
///
/// Returns `None` when no separator is present or the start part is empty.
pub fn split_range(text: &str) -> Option<(&str, &str)> {
    let (index, separator) = RANGE_SEPARATORS
        .iter()
        .filter_map(|separator| text.find(separator).map(|index| (index, *separator)))
        .min_by_key(|(index, _)| *index)?;

    let start = text[..index].trim();
    let end = text[index + separator.len()..].trim();
    if start.is_empty() {
        return None;
    }
    Some((start, end))
}

fn parse_known_format(text: &str) -> Option<NaiveDate> {
    parse_year_month_day(text)
        .or_else(|| parse_year_month(text))
        .or_else(|| parse_year(text))
        .or_else(|| parse_month_name(text, "%b"))
        .or_else(|| parse_month_name(text, "%B"))
        .or_else(|| parse_abbreviated_month_with_dot(text))
}

fn parse_year_month_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn parse_year_month(text: &str) -> Option<NaiveDate> {
    if !YEAR_MONTH_RE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok()
}

fn parse_year(text: &str) -> Option<NaiveDate> {
    if !YEAR_ONLY_RE.is_match(text) {
        return None;
    }
    anchor_year(text)
}

fn parse_month_name(text: &str, month_spec: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {text}"), &format!("%d {month_spec} %Y")).ok()
}

fn parse_abbreviated_month_with_dot(text: &str) -> Option<NaiveDate> {
    let (month, year) = text.split_once(". ")?;
    parse_month_name(&format!("{month} {}", year.trim()), "%b")
}

fn extract_year(text: &str) -> Option<NaiveDate> {
    let caps = BARE_YEAR_RE.captures(text)?;
    anchor_year(caps.get(1)?.as_str())
}

fn anchor_year(year: &str) -> Option<NaiveDate> {
    let year = year.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}
