//! Markup-to-markdown conversion.
//!
//! The renderer only needs "HTML in, markdown out". Keeping that behind a
//! trait lets tests feed fixed markdown and lets callers plug in a different
//! converter without touching the render stages.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Converts HTML-flavoured markup to a markdown string.
///
/// Implementations must be total: malformed input yields best-effort (possibly
/// near-empty) markdown, never an error.
pub trait MarkdownConverter {
    fn to_markdown(&self, html: &str) -> String;
}

/// Default converter backed by the `html2md` crate.
///
/// `html2md` writes level 1 and 2 headings in setext form (a line underlined
/// with `=` or `-`). Those are rewritten to ATX form (`# `, `## `) so the
/// renderer sees one heading syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2Md;

static RE_SETEXT_H1: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([^\n]*\S[^\n]*)\n=+[ \t]*$").unwrap());

static RE_SETEXT_H2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([^\n]*\S[^\n]*)\n-+[ \t]*$").unwrap());

/// Rewrite setext headings to ATX headings; other lines are untouched.
pub fn atx_headings(markdown: &str) -> String {
    let s = RE_SETEXT_H1.replace_all(markdown, |caps: &Captures<'_>| {
        format!("# {}", caps[1].trim())
    });
    RE_SETEXT_H2
        .replace_all(&s, |caps: &Captures<'_>| {
            format!("## {}", caps[1].trim())
        })
        .into_owned()
}

impl MarkdownConverter for Html2Md {
    fn to_markdown(&self, html: &str) -> String {
        let markdown = atx_headings(&html2md::parse_html(html));
        debug!(
            "html2md: {} bytes markup → {} bytes markdown",
            html.len(),
            markdown.len()
        );
        markdown
    }
}

impl<F> MarkdownConverter for F
where
    F: Fn(&str) -> String,
{
    fn to_markdown(&self, html: &str) -> String {
        self(html)
    }
}

/// Convert markup with the default converter.
pub fn html_to_markdown(html: &str) -> String {
    Html2Md.to_markdown(html)
}
