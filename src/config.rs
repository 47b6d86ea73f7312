//! Configuration types for reading an article.
//!
//! Two layers: [`RenderOptions`] holds the two switches the render pipeline
//! reads, and [`ReaderConfig`] wraps those together with everything the
//! surrounding collaborators need (extraction backend, timeout, pager).
//! `ReaderConfig` is built via its [`ReaderConfigBuilder`].

use crate::error::ReaderError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Switches for the render pipeline. Fixed before rendering starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Reduce `[label](url)` to `label` and drop empty `[]()` anchors.
    pub strip_links: bool,
    /// No terminal escapes anywhere; markdown syntax is left literal.
    pub plain_text: bool,
}

/// Where the article's title and content come from.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionBackend {
    /// Fetch the page and run readability extraction locally. (default)
    #[default]
    Readability,
    /// Ask a remote extraction API: `GET {endpoint}?url=<url>` with an
    /// `x-api-key` header, answering `{"title": ..., "content": ...}`.
    Api {
        endpoint: String,
        api_key: Option<String>,
    },
}

impl ExtractionBackend {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionBackend::Readability => "readability",
            ExtractionBackend::Api { .. } => "api",
        }
    }
}

impl fmt::Debug for ExtractionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionBackend::Readability => f.write_str("Readability"),
            ExtractionBackend::Api { endpoint, api_key } => f
                .debug_struct("Api")
                .field("endpoint", endpoint)
                .field("api_key", &api_key.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

/// Configuration for one read.
///
/// Built via [`ReaderConfig::builder()`] or using [`ReaderConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_termread::ReaderConfig;
///
/// let config = ReaderConfig::builder()
///     .strip_links(true)
///     .timeout_secs(10)
///     .build()
///     .unwrap();
/// assert!(config.render.strip_links);
/// ```
#[derive(Clone)]
pub struct ReaderConfig {
    /// Render switches. Default: styled output, links kept.
    pub render: RenderOptions,

    /// Extraction backend. Default: [`ExtractionBackend::Readability`].
    pub backend: ExtractionBackend,

    /// HTTP timeout for the fetch, in seconds. Default: 30.
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    /// Default: `edgequake-termread/<version>`.
    pub user_agent: String,

    /// Pager command line for the display sink. Default: `less -R -s`, so
    /// escape codes reach the terminal raw instead of as literal `ESC[1m`.
    pub pager: String,

    /// Optional stage-level progress hooks.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            backend: ExtractionBackend::default(),
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            pager: "less -R -s".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ReaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderConfig")
            .field("render", &self.render)
            .field("backend", &self.backend)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("pager", &self.pager)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ReadProgressCallback>"),
            )
            .finish()
    }
}

impl ReaderConfig {
    /// Create a new builder for `ReaderConfig`.
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReaderConfig`].
#[derive(Debug)]
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    pub fn render(mut self, options: RenderOptions) -> Self {
        self.config.render = options;
        self
    }

    pub fn strip_links(mut self, v: bool) -> Self {
        self.config.render.strip_links = v;
        self
    }

    pub fn plain_text(mut self, v: bool) -> Self {
        self.config.render.plain_text = v;
        self
    }

    pub fn backend(mut self, backend: ExtractionBackend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Use the remote extraction API at `endpoint`.
    pub fn api(mut self, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        self.config.backend = ExtractionBackend::Api {
            endpoint: endpoint.into(),
            api_key,
        };
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn pager(mut self, command: impl Into<String>) -> Self {
        self.config.pager = command.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReaderConfig, ReaderError> {
        let c = &self.config;
        if c.timeout_secs == 0 {
            return Err(ReaderError::InvalidConfig(
                "Timeout must be ≥ 1 second".into(),
            ));
        }
        if c.pager.trim().is_empty() {
            return Err(ReaderError::InvalidConfig(
                "Pager command must not be empty".into(),
            ));
        }
        if let ExtractionBackend::Api { endpoint, .. } = &c.backend {
            if endpoint.trim().is_empty() {
                return Err(ReaderError::InvalidConfig(
                    "API endpoint must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}
