//! Read entry points: fetch, extract, render, optionally save.
//!
//! Rendering is synchronous and pure; all I/O happens strictly before it
//! (fetch + extraction) or after it (file write). A fetch failure aborts the
//! read before the render pipeline is ever invoked.

use crate::config::ReaderConfig;
use crate::error::ReaderError;
use crate::output::{ReadOutput, ReadStats};
use crate::pipeline::{fetch, render};
use crate::sink;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Fetch the article at `url` and render it for the terminal.
///
/// # Errors
/// Returns `Err(ReaderError)` when the URL is invalid, the fetch fails, or
/// extraction produces no article. Rendering itself cannot fail.
pub async fn read(url: impl AsRef<str>, config: &ReaderConfig) -> Result<ReadOutput, ReaderError> {
    let total_start = Instant::now();
    let url = url.as_ref();
    info!("Starting read: {}", url);

    // ── Step 1: Fetch + extract ──────────────────────────────────────────
    if let Some(ref cb) = config.progress_callback {
        cb.on_fetch_start(url, config.backend.name());
    }
    let fetch_start = Instant::now();
    let article = match fetch::fetch_article(url, config).await {
        Ok(article) => article,
        Err(e) => {
            if let Some(ref cb) = config.progress_callback {
                cb.on_error(&e.to_string());
            }
            return Err(e);
        }
    };
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_extracted(&article.title, article.content.len());
    }

    // ── Step 2: Render ───────────────────────────────────────────────────
    let render_start = Instant::now();
    let rendered = render::render(&article, config.render);
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    let rendered_lines = rendered.lines().count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_rendered(rendered.len(), rendered_lines);
    }

    let stats = ReadStats {
        content_bytes: article.content.len(),
        rendered_bytes: rendered.len(),
        rendered_lines,
        fetch_duration_ms,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Read complete: {} lines, {}ms total",
        stats.rendered_lines, stats.total_duration_ms
    );

    Ok(ReadOutput {
        url: url.to_string(),
        article,
        rendered,
        stats,
    })
}

/// Read an article and save the rendering as `<title>.txt` inside `dir`.
///
/// Returns the path written.
pub async fn read_to_file(
    url: impl AsRef<str>,
    dir: impl AsRef<Path>,
    config: &ReaderConfig,
) -> Result<PathBuf, ReaderError> {
    let output = read(url, config).await?;
    sink::save(&output.rendered, dir.as_ref(), &output.article.title).await
}

/// Synchronous wrapper around [`read`].
///
/// Creates a temporary tokio runtime internally.
pub fn read_sync(url: impl AsRef<str>, config: &ReaderConfig) -> Result<ReadOutput, ReaderError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ReaderError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(read(url, config))
}
