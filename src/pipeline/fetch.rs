//! Fetching: resolve a URL to an [`Article`] through the configured backend.
//!
//! This is the only stage with network I/O. It validates the URL, sends one
//! request (no retries), maps transport and status failures onto
//! [`ReaderError`], and hands the body to [`crate::pipeline::extract`].

use crate::config::{ExtractionBackend, ReaderConfig};
use crate::error::ReaderError;
use crate::output::Article;
use crate::pipeline::extract;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Header carrying the key for the extraction API.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Check that `input` is an absolute HTTP/HTTPS URL with a host.
pub fn parse_url(input: &str) -> Result<Url, ReaderError> {
    let invalid = || ReaderError::InvalidUrl {
        input: input.to_string(),
    };
    let url = Url::parse(input.trim()).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(invalid()),
    }
}

/// Fetch and extract the article at `url` using `config.backend`.
///
/// Fails with [`ReaderError::EmptyArticle`] when extraction succeeds but
/// yields no content, so callers never render an absent article.
pub async fn fetch_article(url: &str, config: &ReaderConfig) -> Result<Article, ReaderError> {
    let page_url = parse_url(url)?;
    let client = build_client(config)?;

    let article = match &config.backend {
        ExtractionBackend::Readability => {
            let html = fetch_html(&client, &page_url, config.timeout_secs).await?;
            extract::extract_readable(&html, page_url.as_str())?
        }
        ExtractionBackend::Api { endpoint, api_key } => {
            let key = api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| ReaderError::MissingApiKey {
                    backend: config.backend.name().to_string(),
                })?;
            fetch_from_api(&client, endpoint, key, &page_url, config.timeout_secs).await?
        }
    };

    if article.content.trim().is_empty() {
        return Err(ReaderError::EmptyArticle {
            url: page_url.to_string(),
        });
    }

    info!(
        "Extracted '{}' ({} bytes) via {}",
        article.title,
        article.content.len(),
        config.backend.name()
    );
    Ok(article)
}

fn build_client(config: &ReaderConfig) -> Result<Client, ReaderError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| ReaderError::Internal(format!("Failed to build HTTP client: {e}")))
}

/// GET the page itself and return its body as text.
async fn fetch_html(client: &Client, url: &Url, timeout_secs: u64) -> Result<String, ReaderError> {
    info!("Fetching article from: {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| send_error(e, url.as_str(), timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReaderError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            message: None,
        });
    }

    let html = response
        .text()
        .await
        .map_err(|e| send_error(e, url.as_str(), timeout_secs))?;
    debug!("Fetched {} bytes of HTML", html.len());
    Ok(html)
}

/// Ask the extraction API for the article at `page_url`.
async fn fetch_from_api(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    page_url: &Url,
    timeout_secs: u64,
) -> Result<Article, ReaderError> {
    let request_url = Url::parse_with_params(endpoint, &[("url", page_url.as_str())])
        .map_err(|e| ReaderError::InvalidConfig(format!("Invalid API endpoint '{endpoint}': {e}")))?;
    info!("Requesting article from extraction API: {}", endpoint);

    let response = client
        .get(request_url)
        .header(API_KEY_HEADER, api_key)
        .send()
        .await
        .map_err(|e| send_error(e, endpoint, timeout_secs))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| send_error(e, endpoint, timeout_secs))?;

    if !status.is_success() {
        return Err(ReaderError::HttpStatus {
            url: page_url.to_string(),
            status: status.as_u16(),
            message: extract::api_error_message(&body),
        });
    }

    extract::parse_api_response(&body, page_url.as_str())
}

fn send_error(e: reqwest::Error, url: &str, timeout_secs: u64) -> ReaderError {
    if e.is_timeout() {
        ReaderError::FetchTimeout {
            url: url.to_string(),
            secs: timeout_secs,
        }
    } else {
        ReaderError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}
