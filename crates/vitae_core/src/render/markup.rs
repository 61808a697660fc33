//! Inline markdown flattening.

use super::RenderedLink;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("valid link regex"));
// Delimiters must pair up and hug their content, so `5 * 3` stays literal.
// Underscores are never emphasis here: `__init__` and `snake_case` are names.
static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`([^`]+)`|\*\*([^*\s](?:[^*]*[^*\s])?)\*\*|\*([^*\s](?:[^*]*[^*\s])?)\*")
        .expect("valid emphasis regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Flattens inline markdown to plain text.
///
/// Rules:
/// - `[text](url)` becomes `text [n]`, and the link is appended to `links`
///   with index `n` (1-based, continuing the existing numbering).
/// - Paired `**strong**`, `*emphasis*` and `` `code` `` markers are removed,
///   including inside link text. Unpaired markers are kept.
/// - Whitespace runs collapse to one space.
pub fn render_inline(text: &str, links: &mut Vec<RenderedLink>) -> String {
    let with_refs = MARKDOWN_LINK_RE.replace_all(text, |caps: &Captures<'_>| {
        let index = links.len() + 1;
        let label = strip_emphasis(&caps[1]);
        let rendered = format!("{label} [{index}]");
        links.push(RenderedLink {
            index,
            text: label,
            url: caps[2].to_string(),
        });
        rendered
    });
    let plain = strip_emphasis(&with_refs);
    WHITESPACE_RE.replace_all(plain.trim(), " ").into_owned()
}

fn strip_emphasis(text: &str) -> String {
    EMPHASIS_RE
        .replace_all(text, |caps: &Captures<'_>| {
            (1..=3)
                .find_map(|group| caps.get(group))
                .map(|inner| inner.as_str().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::render_inline;

    #[test]
    fn links_become_numbered_references() {
        let mut links = Vec::new();
        let line = render_inline(
            "Built [vitae](https://example.com/vitae) and [docs](https://docs.rs)",
            &mut links,
        );
        assert_eq!(line, "Built vitae [1] and docs [2]");
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].url, "https://docs.rs");
    }

    #[test]
    fn numbering_continues_across_calls() {
        let mut links = Vec::new();
        render_inline("[a](https://a.dev)", &mut links);
        let second = render_inline("[b](https://b.dev)", &mut links);
        assert_eq!(second, "b [2]");
    }

    #[test]
    fn strips_emphasis_and_collapses_whitespace() {
        let mut links = Vec::new();
        let line = render_inline("  **Led**   a `cargo`\n*rewrite* ", &mut links);
        assert_eq!(line, "Led a cargo rewrite");
        assert!(links.is_empty());
    }

    #[test]
    fn unpaired_markers_stay_literal() {
        let mut links = Vec::new();
        assert_eq!(render_inline("Cut 5 * 3 steps", &mut links), "Cut 5 * 3 steps");
        assert_eq!(
            render_inline("Overrode __init__ in snake_case code", &mut links),
            "Overrode __init__ in snake_case code"
        );
        assert_eq!(render_inline("`a*b` is *fast*", &mut links), "a*b is fast");
    }

    #[test]
    fn link_text_loses_emphasis_markers() {
        let mut links = Vec::new();
        let line = render_inline("See **[the *docs*](https://docs.rs)**", &mut links);
        assert_eq!(line, "See the docs [1]");
        assert_eq!(links[0].text, "the docs");
    }
}
