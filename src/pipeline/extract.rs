//! Extraction: turn a fetched response into an [`Article`].
//!
//! Pure functions over bytes and strings, so both backends can be tested
//! without a network. The HTTP side lives in [`crate::pipeline::fetch`].

use crate::error::ReaderError;
use crate::output::Article;
use dom_smoothie::{Config, Readability};
use serde::Deserialize;
use tracing::debug;

/// Upper bound on elements readability will walk before giving up.
const MAX_ELEMENTS_TO_PARSE: usize = 9000;

/// Run readability extraction over a full HTML page.
///
/// `url` is the page's own address; readability uses it to resolve relative
/// links inside the extracted content.
pub fn extract_readable(html: &str, url: &str) -> Result<Article, ReaderError> {
    let cfg = Config {
        max_elements_to_parse: MAX_ELEMENTS_TO_PARSE,
        ..Default::default()
    };

    let mut readability =
        Readability::new(html, Some(url), Some(cfg)).map_err(|e| ReaderError::ExtractionFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let parsed = readability
        .parse()
        .map_err(|e| ReaderError::ExtractionFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let article = Article::new(parsed.title.trim(), parsed.content.to_string());
    debug!(
        "Readability extracted '{}' ({} bytes of markup)",
        article.title,
        article.content.len()
    );
    Ok(article)
}

/// Success body of the extraction API. Fields may be absent or null.
#[derive(Debug, Deserialize)]
struct ApiArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Error body of the extraction API.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Decode a successful extraction-API response.
pub fn parse_api_response(body: &[u8], url: &str) -> Result<Article, ReaderError> {
    let parsed: ApiArticle =
        serde_json::from_slice(body).map_err(|e| ReaderError::ExtractionFailed {
            url: url.to_string(),
            reason: format!("Unable to decode API response: {e}"),
        })?;

    Ok(Article::new(
        parsed.title.unwrap_or_default().trim(),
        parsed.content.unwrap_or_default(),
    ))
}

/// Pull the server's `{"message": ...}` explanation out of an error body.
pub fn api_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiMessage>(body)
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.trim().is_empty())
}
