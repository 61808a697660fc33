//! Interactive text rendering.
//!
//! # Responsibility
//! - Select one render template per entry kind.
//! - Turn inline markdown into plain lines plus a numbered link list.
//!
//! # Invariants
//! - Links travel with the block that references them; no lookup state is
//!   shared between render calls.
//! - `Unknown` entries render as a raw key/value dump.

pub mod markup;
pub mod template;

/// Link extracted from inline markdown, referenced as `[index]` in lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLink {
    pub index: usize,
    pub text: String,
    pub url: String,
}

/// Plain-text lines plus the links they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub lines: Vec<String>,
    pub links: Vec<RenderedLink>,
}

impl RenderedBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block holding a single plain line.
    pub fn message(line: impl Into<String>) -> Self {
        let mut block = Self::new();
        block.push_line(line);
        block
    }

    /// Appends a line verbatim.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends `prefix` followed by `text` rendered from inline markdown.
    pub fn push_markup(&mut self, prefix: &str, text: &str) {
        let rendered = markup::render_inline(text, &mut self.links);
        self.lines.push(format!("{prefix}{rendered}"));
    }

    /// Appends an empty separator line unless the block is empty or already
    /// ends with one.
    pub fn push_blank(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    /// Appends a link that is not referenced inline, e.g. a profile URL.
    pub fn push_link(&mut self, text: impl Into<String>, url: impl Into<String>) -> usize {
        let index = self.links.len() + 1;
        self.links.push(RenderedLink {
            index,
            text: text.into(),
            url: url.into(),
        });
        index
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
