//! CLI binary for edgequake-termread.
//!
//! A thin shim over the library crate that maps CLI flags to `ReaderConfig`,
//! reads the article, and pages, prints or saves the result.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_termread::sink;
use edgequake_termread::{read, ProgressCallback, ReadProgressCallback, ReaderConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers ──────────────────────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner on stderr while the article is fetched and rendered.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Reading");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ReadProgressCallback for CliProgressCallback {
    fn on_fetch_start(&self, url: &str, backend: &str) {
        self.bar.set_message(format!("{url} {}", dim(&format!("via {backend}"))));
    }

    fn on_extracted(&self, title: &str, content_len: usize) {
        self.bar.set_prefix("Rendering");
        self.bar
            .set_message(format!("{title} {}", dim(&format!("{content_len} bytes"))));
    }

    fn on_rendered(&self, _rendered_len: usize, _lines: usize) {
        self.bar.finish_and_clear();
    }

    fn on_error(&self, error: &str) {
        self.bar.finish_and_clear();
        // Keep the line tidy; the full error follows from main.
        let first = error.lines().next().unwrap_or(error);
        eprintln!("{} {}", red("✗"), first);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Read an article in the pager
  termread https://example.org/post

  # Without links and without ANSI styling
  termread --no-links --plaintext https://example.org/post

  # Save as "<title>.txt" in ./articles
  termread -o articles https://example.org/post

  # Print to stdout (also the default when stdout is not a terminal)
  termread --stdout https://example.org/post | head

  # Use a remote extraction API instead of local readability
  TERMREAD_API_KEY=... termread --api-endpoint https://extract.example.org/parser URL

ENVIRONMENT VARIABLES:
  PAGER                  Pager command (default: less -R -s)
  TERMREAD_API_ENDPOINT  Extraction API endpoint
  TERMREAD_API_KEY       Extraction API key (sent as x-api-key)
  RUST_LOG               Override log filter (e.g. debug)
"#;

/// Read web articles in the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "termread",
    version,
    about = "Read web articles in the terminal",
    long_about = "Fetch a web article, extract its readable content, and show it as wrapped \
80-column terminal text in a pager, on stdout, or saved to a file named after the title.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Article URL (http or https).
    url: String,

    /// Remove links, keeping only their text.
    #[arg(long = "no-links", env = "TERMREAD_NO_LINKS")]
    no_links: bool,

    /// Disable ANSI styling (plain-text output).
    #[arg(long, env = "TERMREAD_PLAINTEXT")]
    plaintext: bool,

    /// Save the article as "<title>.txt" in this directory instead of paging it.
    #[arg(short, long = "output-dir", env = "TERMREAD_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Print to stdout instead of starting the pager.
    #[arg(long)]
    stdout: bool,

    /// Pager command line.
    #[arg(long, env = "PAGER", default_value = "less -R -s")]
    pager: String,

    /// Extraction API endpoint; when set, the API is used instead of local readability.
    #[arg(long, env = "TERMREAD_API_ENDPOINT")]
    api_endpoint: Option<String>,

    /// Extraction API key.
    #[arg(long, env = "TERMREAD_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, env = "TERMREAD_TIMEOUT", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Output structured JSON (article, rendering and stats) instead of text.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "TERMREAD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TERMREAD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TERMREAD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides the feedback that matters; keep INFO logs out of
    // its way unless verbose.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && io::stderr().is_terminal();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ReadProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Read ─────────────────────────────────────────────────────────────
    let output = read(&cli.url, &config).await.context("Reading failed")?;

    // ── Output ───────────────────────────────────────────────────────────
    if let Some(ref dir) = cli.output_dir {
        let path = sink::save(&output.rendered, dir, &output.article.title)
            .await
            .context("Saving failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} lines  {}ms  →  {}",
                green("✔"),
                output.stats.rendered_lines,
                output.stats.total_duration_ms,
                bold(&path.display().to_string()),
            );
        }
    } else if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if cli.stdout || !io::stdout().is_terminal() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.rendered.as_bytes())
            .context("Failed to write to stdout")?;
        if !output.rendered.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    } else {
        sink::page(&output.rendered, &config.pager)
            .await
            .context("Paging failed")?;
    }

    Ok(())
}

/// Map CLI args to `ReaderConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ReaderConfig> {
    let mut builder = ReaderConfig::builder()
        .strip_links(cli.no_links)
        .plain_text(cli.plaintext)
        .timeout_secs(cli.timeout)
        .pager(cli.pager.clone());

    if let Some(ref endpoint) = cli.api_endpoint {
        builder = builder.api(endpoint.clone(), cli.api_key.clone());
    }

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
