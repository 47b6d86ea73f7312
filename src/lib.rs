//! # edgequake-termread
//!
//! Read web articles in the terminal.
//!
//! ## Why this crate?
//!
//! Web pages are mostly navigation, ads and boilerplate. This crate extracts
//! the readable article, converts it to Markdown, and renders that as stable
//! 80-column terminal text: blank lines collapsed, indentation artefacts
//! removed, links optionally reduced to their labels, bold and section
//! headings shown in terminal bold.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URL
//!  │
//!  ├─ 1. Fetch     GET the page (or ask an extraction API)
//!  ├─ 2. Extract   readability → (title, markup)
//!  ├─ 3. Convert   markup → markdown (html2md)
//!  ├─ 4. Render    unescape, collapse, strip, links?, styles?, wrap, title
//!  └─ 5. Output    pager or <title>.txt
//! ```
//!
//! Steps 3–4 are pure and deterministic; see [`render`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_termread::{read, ReaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReaderConfig::builder().strip_links(true).build()?;
//!     let output = read("https://example.org/post", &config).await?;
//!     println!("{}", output.rendered);
//!     Ok(())
//! }
//! ```
//!
//! Rendering alone needs no network:
//!
//! ```rust
//! use edgequake_termread::{render_with, Article, RenderOptions};
//!
//! let article = Article::new("Example", "<h2>Intro</h2><p>Hello   world.</p>");
//! let options = RenderOptions { strip_links: false, plain_text: true };
//! let md = |_: &str| "## Intro\n\nHello   world.".to_string();
//! assert_eq!(render_with(&article, options, &md), "Example\n## Intro\n\nHello world.");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `termread` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod read;
pub mod sink;
pub mod style;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionBackend, ReaderConfig, ReaderConfigBuilder, RenderOptions};
pub use error::ReaderError;
pub use output::{Article, ReadOutput, ReadStats};
pub use pipeline::fetch::fetch_article;
pub use pipeline::markdown::{html_to_markdown, Html2Md, MarkdownConverter};
pub use pipeline::render::{render, render_with, WRAP_WIDTH};
pub use progress::{NoopProgressCallback, ProgressCallback, ReadProgressCallback};
pub use read::{read, read_sync, read_to_file};
pub use style::{AnsiStyler, PlainStyler, Styler};
