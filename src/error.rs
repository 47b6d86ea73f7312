//! Error types for the edgequake-termread library.
//!
//! The render pipeline itself is total over string input and has no error
//! type. Everything that can fail lives around it: fetching the page,
//! extracting the article, writing the output file and spawning the pager.
//! All of those failures surface as [`ReaderError`] and are reported, never
//! recovered; the pipeline is only ever invoked with a complete article.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-termread library.
#[derive(Debug, Error)]
pub enum ReaderError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input string is not an absolute HTTP/HTTPS URL.
    #[error("Invalid URL '{input}': expected an absolute http:// or https:// URL")]
    InvalidUrl { input: String },

    // ── Fetch errors ──────────────────────────────────────────────────────
    /// The request could not be sent or the body could not be read.
    #[error("Failed to fetch '{url}': {reason}\nCheck your internet connection.")]
    FetchFailed { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Fetching '{url}' timed out after {secs}s\nIncrease --timeout.")]
    FetchTimeout { url: String, secs: u64 },

    /// The server answered with a non-success status.
    ///
    /// `message` holds the server's own explanation when the body carried a
    /// JSON `{"message": ...}` object (the extraction API does this).
    #[error("Received HTTP {status} for '{url}'{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    HttpStatus {
        url: String,
        status: u16,
        message: Option<String>,
    },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The API backend was selected but no key was configured.
    #[error("API key not found for backend '{backend}'.\nSet TERMREAD_API_KEY or pass --api-key.")]
    MissingApiKey { backend: String },

    /// Readability found nothing, or the API response could not be decoded.
    #[error("Could not extract an article from '{url}': {reason}")]
    ExtractionFailed { url: String, reason: String },

    /// Extraction succeeded but the article has no content.
    #[error("Article at '{url}' has no readable content")]
    EmptyArticle { url: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pager could not be started or exited with an error.
    #[error("Pager '{command}' failed: {reason}\nUse --stdout to print without a pager.")]
    PagerFailed { command: String, reason: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display_with_message() {
        let e = ReaderError::HttpStatus {
            url: "https://example.org/a".into(),
            status: 401,
            message: Some("Invalid API key".into()),
        };
        let msg = e.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.ends_with(": Invalid API key"), "got: {msg}");
    }

    #[test]
    fn http_status_display_without_message() {
        let e = ReaderError::HttpStatus {
            url: "https://example.org/a".into(),
            status: 404,
            message: None,
        };
        assert_eq!(
            e.to_string(),
            "Received HTTP 404 for 'https://example.org/a'"
        );
    }

    #[test]
    fn timeout_display() {
        let e = ReaderError::FetchTimeout {
            url: "https://example.org".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
    }

    #[test]
    fn missing_api_key_display() {
        let e = ReaderError::MissingApiKey {
            backend: "api".into(),
        };
        assert!(e.to_string().contains("TERMREAD_API_KEY"));
    }
}
