//! Progress-callback trait for read-stage events.
//!
//! Inject an [`Arc<dyn ReadProgressCallback>`] via
//! [`crate::config::ReaderConfigBuilder::progress_callback`] to hear about
//! each stage as [`crate::read`] runs: the fetch starting, the article being
//! extracted, the rendering finishing, or the read failing.
//!
//! # Example
//!
//! ```rust
//! use edgequake_termread::{ReadProgressCallback, ReaderConfig};
//! use std::sync::Arc;
//!
//! struct Log;
//!
//! impl ReadProgressCallback for Log {
//!     fn on_extracted(&self, title: &str, content_len: usize) {
//!         eprintln!("extracted '{title}' ({content_len} bytes)");
//!     }
//! }
//!
//! let config = ReaderConfig::builder()
//!     .progress_callback(Arc::new(Log) as Arc<dyn ReadProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by [`crate::read`] at each stage boundary.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ReadProgressCallback: Send + Sync {
    /// Called before the network request is sent.
    ///
    /// # Arguments
    /// * `url`     — the article URL
    /// * `backend` — extraction backend name (`readability` or `api`)
    fn on_fetch_start(&self, url: &str, backend: &str) {
        let _ = (url, backend);
    }

    /// Called once the article title and markup are available.
    ///
    /// # Arguments
    /// * `title`       — extracted title, possibly empty
    /// * `content_len` — byte length of the extracted markup
    fn on_extracted(&self, title: &str, content_len: usize) {
        let _ = (title, content_len);
    }

    /// Called after the render pipeline produced the terminal text.
    ///
    /// # Arguments
    /// * `rendered_len` — byte length of the rendered output
    /// * `lines`        — line count of the rendered output
    fn on_rendered(&self, rendered_len: usize, lines: usize) {
        let _ = (rendered_len, lines);
    }

    /// Called when fetching or extraction failed; rendering will not run.
    fn on_error(&self, error: &str) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ReadProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ReaderConfig`].
pub type ProgressCallback = Arc<dyn ReadProgressCallback>;
