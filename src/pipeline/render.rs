//! Rendering: deterministic conversion of extracted markup to terminal text.
//!
//! Markdown converters leave irregular blank-line runs, indentation
//! artefacts from the source markup and raw `[label](url)` syntax behind.
//! This module turns that into stable 80-column text through a fixed chain
//! of small pure functions (`&str → String`), each independently testable.
//!
//! ## Stage Order
//!
//! ```text
//! markup ─▶ markdown ─▶ unescape ─▶ collapse ─▶ strip indent ─▶ links? ─▶ styles? ─▶ wrap ─▶ title
//! ```
//!
//! Whitespace is normalised before links are stripped, so the gap left by a
//! removed `[]()` is not cleaned up again. Styles are annotated before
//! wrapping so the wrapper sees the final escape codes and can measure them
//! as zero-width.

use crate::config::RenderOptions;
use crate::output::Article;
use crate::pipeline::markdown::{Html2Md, MarkdownConverter};
use crate::style::{styler_for, Styler};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Column at which the body is wrapped.
pub const WRAP_WIDTH: usize = 80;

/// Render an article for the terminal using the default HTML converter.
///
/// Total and deterministic: identical `(article, options)` always produce
/// byte-identical output.
pub fn render(article: &Article, options: RenderOptions) -> String {
    render_with(article, options, &Html2Md)
}

/// Render an article with a caller-supplied markup-to-markdown converter.
pub fn render_with(
    article: &Article,
    options: RenderOptions,
    converter: &dyn MarkdownConverter,
) -> String {
    let styler = styler_for(options.plain_text);
    let markdown = converter.to_markdown(&article.content);
    let body = render_body(&markdown, options, styler);
    frame_title(&article.title, &body, styler)
}

/// Run the body stages over already-converted markdown.
///
/// Stages (applied in order):
/// 1. Unescape HTML entities
/// 2. Collapse blank-line runs to a single blank line
/// 3. Strip incidental indentation and interior space runs
/// 4. Strip links (only with `strip_links`)
/// 5. Annotate bold and level-2 headings (skipped with `plain_text`)
/// 6. Wrap to [`WRAP_WIDTH`] columns
pub fn render_body(markdown: &str, options: RenderOptions, styler: &dyn Styler) -> String {
    let s = unescape_entities(markdown);
    let s = collapse_blank_lines(&s);
    let s = strip_leading_whitespace(&s);
    let s = if options.strip_links {
        strip_links(&s)
    } else {
        s
    };
    let s = if options.plain_text {
        s
    } else {
        annotate_styles(&s, styler)
    };
    wrap_lines(&s, WRAP_WIDTH)
}

// ── Stage 1: Unescape HTML entities ──────────────────────────────────────────

/// Decode HTML entities (`&amp;`, `&#39;`, `&nbsp;` …) left by the converter.
pub fn unescape_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

// ── Stage 2: Collapse blank lines ────────────────────────────────────────────

// ASCII whitespace only: a no-break space decoded from `&nbsp;` is content.
static RE_BLANK_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[\t\f\r ]*\n){2,}").unwrap());

/// Collapse any whitespace run containing two or more line breaks into
/// exactly one blank line. Idempotent.
pub fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_RUNS.replace_all(input, "\n\n").into_owned()
}

// ── Stage 3: Strip leading whitespace ────────────────────────────────────────

// Group 1 is the line start or the separating space, which is kept.
static RE_LEADING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(^| )[ \t]+").unwrap());

/// Remove spaces and tabs that follow a line start or a space.
///
/// Indentation disappears entirely; an interior run such as `"a   b"`
/// keeps its first space and becomes `"a b"`.
pub fn strip_leading_whitespace(input: &str) -> String {
    RE_LEADING_WS.replace_all(input, "${1}").into_owned()
}

// ── Stage 4: Strip links ─────────────────────────────────────────────────────

static RE_EMPTY_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"!?\[\]\(\)").unwrap());

// The label may hold one level of balanced `[...]` and the url one level of
// balanced `(...)`; otherwise each stops at its nearest closing bracket, so
// two links on one line never merge into one match.
static RE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!?\[((?:[^\[\]]|\[[^\[\]]*\])*)\]\(((?:[^()]|\([^()]*\))*)\)").unwrap()
});

/// Remove empty `[]()` anchors, then reduce every `[label](url)` to `label`.
///
/// Citation labels such as `[[1]](#cite)` keep their inner brackets, and
/// urls like `.../Rust_(programming_language)` are matched whole. Image
/// syntax `![alt](src)` reduces to `alt`. Replacement repeats until no link
/// is left, which unwraps an image nested inside a link.
pub fn strip_links(input: &str) -> String {
    let mut s = RE_EMPTY_LINK.replace_all(input, "").into_owned();
    while RE_LINK.is_match(&s) {
        s = RE_LINK.replace_all(&s, "${1}").into_owned();
    }
    s
}

// ── Stage 5: Annotate styles ─────────────────────────────────────────────────

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());

/// Replace `## text` lines and `**text**` with styled text.
///
/// Only these two constructs are styled. Other heading levels, italics,
/// code spans and lists pass through untouched. Headings go first and drop
/// their inner `**` markers, so an inner reset never cuts the heading short.
pub fn annotate_styles(input: &str, styler: &dyn Styler) -> String {
    let s = RE_H2.replace_all(input, |caps: &Captures<'_>| {
        let text = RE_BOLD.replace_all(caps[1].trim_end(), "${1}");
        styler.bold(&text)
    });
    RE_BOLD
        .replace_all(&s, |caps: &Captures<'_>| styler.bold(&caps[1]))
        .into_owned()
}

// ── Stage 6: Wrap lines ──────────────────────────────────────────────────────

/// Wrap every line to `width` display columns.
///
/// Escape sequences count as zero columns and never contain a break point,
/// since words are separated on ASCII spaces only. Blank lines survive as
/// paragraph breaks. Words wider than `width` are neither split nor
/// hyphenated; they overflow on a line of their own. Lines are filled
/// greedily, first fit.
pub fn wrap_lines(input: &str, width: usize) -> String {
    let options = Options::new(width)
        .break_words(false)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation);
    textwrap::fill(input, options)
}

// ── Stage 7: Frame with title ────────────────────────────────────────────────

/// Prefix the body with the title on its own line.
///
/// The title is `bold(accent(title))` through `styler`, so plain mode yields
/// the bare title. Whitespace inside the title (including line breaks) is
/// folded to single spaces, and the body loses its leading and trailing line
/// breaks, so exactly one `\n` separates title and body.
pub fn frame_title(title: &str, body: &str, styler: &dyn Styler) -> String {
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let styled = styler.bold(&styler.accent(&title));
    let body = body.trim_start_matches(['\n', '\r']).trim_end();
    format!("{styled}\n{body}")
}

// ── Tests ────────────────────────────────────────────────────────────────────
