//! Pipeline stages for reading an article.
//!
//! Each submodule implements exactly one step, so each is testable alone.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ extract ──▶ markdown ──▶ render
//! (HTTP)    (title,     (html2md)    (pure text stages)
//!            markup)
//! ```
//!
//! 1. [`fetch`]    — validate the URL and GET the page or the extraction API;
//!    the only stage with network I/O
//! 2. [`extract`]  — readability over the HTML, or decode the API's JSON
//! 3. [`markdown`] — markup → markdown behind the [`markdown::MarkdownConverter`] trait
//! 4. [`render`]   — deterministic text stages producing terminal output

pub mod extract;
pub mod fetch;
pub mod markdown;
pub mod render;
