//! Fetching the target page.
//!
//! A single GET against the target URL, following redirects (reqwest default
//! policy), with the timeout configured on the shared client. Any transport
//! failure, non-2xx status, or empty body surfaces as a typed [`FetchError`].

use log::debug;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Reasons the target page could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be completed (DNS, connect, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The server answered 2xx but the body was empty.
    #[error("empty response body")]
    EmptyBody,
}

/// Fetches the HTML body of `url`.
///
/// Accepts any 2xx response. Returns the body as a string, or a [`FetchError`]
/// if the URL could not be reached, answered non-2xx, or answered with an
/// empty body.
pub async fn fetch_html(client: &reqwest::Client, url: &Url) -> Result<String, FetchError> {
    let response = client.get(url.clone()).send().await.inspect_err(|e| {
        debug!("Fetch failed for {url}: {e}");
    })?;

    let status = response.status();
    if !status.is_success() {
        debug!("Fetch returned {status} for {url}");
        return Err(FetchError::Status(status));
    }

    let body = response.text().await.inspect_err(|e| {
        debug!("Failed to read body for {url}: {e}");
    })?;

    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    debug!("Fetched {} bytes from {url}", body.len());
    Ok(body)
}
