//! Output sinks: page the rendered text or save it to a file.
//!
//! Both run strictly after rendering and take the finished string verbatim.

use crate::error::ReaderError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Extension of saved articles.
pub const OUTPUT_EXTENSION: &str = "txt";

/// File stem used when the title is empty or sanitises to nothing.
const FALLBACK_STEM: &str = "article";

/// Longest file stem, in bytes.
const MAX_STEM_BYTES: usize = 200;

/// Pipe `text` into the pager command and wait for it to exit.
///
/// `command` is split on whitespace into a program and its arguments, e.g.
/// `less -R -s`. The pager inherits the terminal for stdout and stderr.
pub async fn page(text: &str, command: &str) -> Result<(), ReaderError> {
    let failed = |reason: String| ReaderError::PagerFailed {
        command: command.to_string(),
        reason,
    };

    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| failed("empty pager command".into()))?;

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| failed(e.to_string()))?;
    debug!("Spawned pager '{}'", command);

    if let Some(mut stdin) = child.stdin.take() {
        // The pager may quit before reading everything; a broken pipe is fine.
        match stdin.write_all(text.as_bytes()).await {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                return Err(failed(e.to_string()));
            }
            _ => {}
        }
        drop(stdin);
    }

    let status = child.wait().await.map_err(|e| failed(e.to_string()))?;
    if !status.success() {
        return Err(failed(format!("exited with {status}")));
    }
    Ok(())
}

/// File name for an article titled `title`: `<sanitised title>.txt`.
///
/// Path separators, control characters and characters reserved on common
/// filesystems become `_`; the stem is trimmed and capped at 200 bytes. An
/// empty result falls back to `article.txt`.
pub fn output_file_name(title: &str) -> String {
    let sanitised: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let mut stem = sanitised.trim().trim_matches('.').trim();
    if stem.len() > MAX_STEM_BYTES {
        let mut end = MAX_STEM_BYTES;
        while !stem.is_char_boundary(end) {
            end -= 1;
        }
        stem = stem[..end].trim_end();
    }

    if stem.is_empty() {
        format!("{FALLBACK_STEM}.{OUTPUT_EXTENSION}")
    } else {
        format!("{stem}.{OUTPUT_EXTENSION}")
    }
}

/// Write `text` to `dir/<title>.txt` and return the path.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn save(text: &str, dir: &Path, title: &str) -> Result<PathBuf, ReaderError> {
    let path = dir.join(output_file_name(title));
    let write_failed = |source: std::io::Error| ReaderError::OutputWriteFailed {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(write_failed)?;

    let tmp_path = path.with_extension(format!("{OUTPUT_EXTENSION}.tmp"));
    tokio::fs::write(&tmp_path, text)
        .await
        .map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(write_failed)?;

    info!("Saved article to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_title() {
        assert_eq!(output_file_name("Example"), "Example.txt");
        assert_eq!(output_file_name("  Rust: A/B test?  "), "Rust_ A_B test_.txt");
    }

    #[test]
    fn test_file_name_fallback() {
        assert_eq!(output_file_name(""), "article.txt");
        assert_eq!(output_file_name(" ... "), "article.txt");
    }

    #[test]
    fn test_file_name_truncates_on_char_boundary() {
        let title = "é".repeat(150); // 300 bytes
        let name = output_file_name(&title);
        let stem = name.strip_suffix(".txt").unwrap();
        assert!(stem.len() <= MAX_STEM_BYTES);
        assert!(stem.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_file_name_is_deterministic() {
        assert_eq!(output_file_name("Same"), output_file_name("Same"));
    }

    #[tokio::test]
    async fn test_save_writes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let text = "Title\nbody \x1b[1mbold\x1b[0m";
        let path = save(text, dir.path(), "Title").await.unwrap();
        assert_eq!(path, dir.path().join("Title.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
        assert!(!dir.path().join("Title.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let path = save("x", &nested, "").await.unwrap();
        assert_eq!(path, nested.join("article.txt"));
    }

    #[tokio::test]
    async fn test_page_missing_program_fails() {
        let err = page("text", "definitely-not-a-pager-binary-3141")
            .await
            .unwrap_err();
        assert!(matches!(err, ReaderError::PagerFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_page_through_cat() {
        page("hello pager\n", "cat").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_page_nonzero_exit_fails() {
        let err = page("text", "false").await.unwrap_err();
        assert!(matches!(err, ReaderError::PagerFailed { .. }));
    }
}
