//! Data types produced by extraction and by the read entry points.

use serde::{Deserialize, Serialize};

/// An extracted article.
///
/// Produced once by an extractor and never mutated afterwards. `content` is
/// HTML-flavoured markup; `title` is plain text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Result of [`crate::read`]: the article, its terminal rendering and timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOutput {
    /// The URL the article was read from.
    pub url: String,
    /// The extracted article, before rendering.
    pub article: Article,
    /// Terminal-ready text: title line followed by the wrapped body.
    pub rendered: String,
    pub stats: ReadStats,
}

/// Timing and size figures for one read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadStats {
    /// Bytes of markup returned by the extractor.
    pub content_bytes: usize,
    /// Bytes of rendered output.
    pub rendered_bytes: usize,
    /// Number of lines in the rendered output, title included.
    pub rendered_lines: usize,
    pub fetch_duration_ms: u64,
    pub render_duration_ms: u64,
    pub total_duration_ms: u64,
}
