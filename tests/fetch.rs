//! Integration tests for fetching and extraction against a local HTTP fixture.
//!
//! A tiny one-response-per-connection server on 127.0.0.1 stands in for the
//! article site and the extraction API, so these run without network access.

use edgequake_termread::{
    read, read_to_file, ReadProgressCallback, ReaderConfig, ReaderError,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ── Test helpers ─────────────────────────────────────────────────────────────

struct Fixture {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn last_request(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

/// Serve `body` with `status` to every connection until the test ends.
async fn serve(status: u16, content_type: &'static str, body: String) -> Fixture {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            log.lock()
                .unwrap()
                .push(String::from_utf8_lossy(&head).into_owned());

            let response = format!(
                "HTTP/1.1 {status} Fixture\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Fixture { addr, requests }
}

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Rust in the Terminal</title></head>
<body>
  <nav><a href="/">Home</a> | <a href="/about">About</a></nav>
  <article>
    <h1>Rust in the Terminal</h1>
    <p>Reading long articles in a terminal is pleasant when the text is wrapped, the
    navigation is gone, and the headings stand out. This paragraph exists to give the
    extractor enough prose to score, with commas, clauses, and plenty of words.</p>
    <p>A second paragraph keeps going in the same vein, because readability scoring
    rewards containers that hold several substantial paragraphs of running text, and
    this article container should clearly win over the navigation bar above it.</p>
    <p>The third paragraph closes the article with a few more sentences, ensuring the
    content length comfortably exceeds the character threshold used by the algorithm.</p>
  </article>
  <footer>Copyright nobody</footer>
</body>
</html>"#;

const API_OK: &str = r#"{"title": "Example", "content": "<p>Hello   world.</p>", "word_count": 2}"#;

fn plain_config() -> ReaderConfig {
    ReaderConfig::builder()
        .plain_text(true)
        .timeout_secs(5)
        .build()
        .unwrap()
}

fn api_config(fixture: &Fixture, key: Option<&str>) -> ReaderConfig {
    ReaderConfig::builder()
        .plain_text(true)
        .timeout_secs(5)
        .api(fixture.url("/parser"), key.map(str::to_string))
        .build()
        .unwrap()
}

fn single_spaced(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Readability backend ──────────────────────────────────────────────────────

#[tokio::test]
async fn readability_backend_reads_page() {
    let fixture = serve(200, "text/html; charset=utf-8", PAGE.to_string()).await;

    let output = read(fixture.url("/post"), &plain_config()).await.unwrap();

    assert!(output.article.title.contains("Rust in the Terminal"));
    assert!(output.rendered.starts_with(&format!("{}\n", output.article.title)));
    assert!(single_spaced(&output.rendered).contains("A second paragraph keeps going"));
    assert!(!single_spaced(&output.rendered).contains("Copyright nobody"));
    assert!(!output.rendered.contains('\x1b'));
    assert_eq!(output.stats.rendered_lines, output.rendered.lines().count());

    let request = fixture.last_request().to_lowercase();
    assert!(request.starts_with("get /post "), "got: {request}");
    assert!(request.contains("user-agent: edgequake-termread/"));
}

#[tokio::test]
async fn readability_backend_reports_http_status() {
    let fixture = serve(404, "text/html", "<h1>Not Found</h1>".to_string()).await;

    let err = read(fixture.url("/missing"), &plain_config())
        .await
        .unwrap_err();

    match err {
        ReaderError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, None);
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_fetch_failure() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let err = read(format!("http://127.0.0.1:{port}/post"), &plain_config())
        .await
        .unwrap_err();
    assert!(matches!(err, ReaderError::FetchFailed { .. }), "got: {err:?}");
}

// ── API backend ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn api_backend_reads_article() {
    let fixture = serve(200, "application/json", API_OK.to_string()).await;
    let config = api_config(&fixture, Some("secret-key"));

    let output = read("https://example.org/post", &config).await.unwrap();

    assert_eq!(output.article.title, "Example");
    assert!(output.rendered.starts_with("Example\n"));
    assert!(output.rendered.contains("Hello world."));

    let request = fixture.last_request();
    assert!(
        request.starts_with("GET /parser?url=https%3A%2F%2Fexample.org%2Fpost "),
        "got: {request}"
    );
    assert!(request.to_lowercase().contains("x-api-key: secret-key"));
}

#[tokio::test]
async fn api_backend_surfaces_server_message() {
    let fixture = serve(
        403,
        "application/json",
        r#"{"message": "Forbidden: bad key"}"#.to_string(),
    )
    .await;
    let config = api_config(&fixture, Some("wrong"));

    let err = read("https://example.org/post", &config).await.unwrap_err();

    match err {
        ReaderError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(message.as_deref(), Some("Forbidden: bad key"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn api_backend_empty_content_is_rejected() {
    let fixture = serve(
        200,
        "application/json",
        r#"{"title": "Nothing", "content": "   "}"#.to_string(),
    )
    .await;
    let config = api_config(&fixture, Some("k"));

    let err = read("https://example.org/post", &config).await.unwrap_err();
    assert!(matches!(err, ReaderError::EmptyArticle { .. }), "got: {err:?}");
}

#[tokio::test]
async fn api_backend_requires_key() {
    let fixture = serve(200, "application/json", API_OK.to_string()).await;
    let config = api_config(&fixture, Some("   "));

    let err = read("https://example.org/post", &config).await.unwrap_err();
    assert!(matches!(err, ReaderError::MissingApiKey { .. }));
    assert!(fixture.requests.lock().unwrap().is_empty());
}

// ── Persistence + progress ───────────────────────────────────────────────────

#[tokio::test]
async fn read_to_file_writes_title_named_file() {
    let fixture = serve(200, "application/json", API_OK.to_string()).await;
    let config = api_config(&fixture, Some("k"));
    let dir = tempfile::tempdir().unwrap();

    let path = read_to_file("https://example.org/post", dir.path(), &config)
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("Example.txt"));
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.starts_with("Example\n"));
    assert!(saved.contains("Hello world."));
}

#[derive(Default)]
struct Counting {
    fetches: AtomicUsize,
    extracted: AtomicUsize,
    rendered: AtomicUsize,
    errors: AtomicUsize,
}

impl ReadProgressCallback for Counting {
    fn on_fetch_start(&self, _url: &str, _backend: &str) {
        self.fetches.fetch_add(1, Ordering::SeqCst);
    }
    fn on_extracted(&self, _title: &str, _content_len: usize) {
        self.extracted.fetch_add(1, Ordering::SeqCst);
    }
    fn on_rendered(&self, _rendered_len: usize, _lines: usize) {
        self.rendered.fetch_add(1, Ordering::SeqCst);
    }
    fn on_error(&self, _error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn progress_callback_sees_each_stage() {
    let fixture = serve(200, "application/json", API_OK.to_string()).await;
    let counting = Arc::new(Counting::default());
    let config = ReaderConfig::builder()
        .api(fixture.url("/parser"), Some("k".into()))
        .progress_callback(counting.clone() as Arc<dyn ReadProgressCallback>)
        .build()
        .unwrap();

    read("https://example.org/post", &config).await.unwrap();

    assert_eq!(counting.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(counting.extracted.load(Ordering::SeqCst), 1);
    assert_eq!(counting.rendered.load(Ordering::SeqCst), 1);
    assert_eq!(counting.errors.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn progress_callback_sees_failure_and_no_render() {
    let fixture = serve(500, "text/plain", "boom".to_string()).await;
    let counting = Arc::new(Counting::default());
    let config = ReaderConfig::builder()
        .progress_callback(counting.clone() as Arc<dyn ReadProgressCallback>)
        .build()
        .unwrap();

    assert!(read(fixture.url("/post"), &config).await.is_err());

    assert_eq!(counting.errors.load(Ordering::SeqCst), 1);
    assert_eq!(counting.rendered.load(Ordering::SeqCst), 0);
}
