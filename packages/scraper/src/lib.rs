#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Page fetching and HTML-to-text normalization.
//!
//! Fetches a single web page with a desktop browser `User-Agent` and strips
//! its markup down to clean line-oriented plain text ([`page_text`]). This
//! crate is a pure scraping library: it has no awareness of the extraction
//! pipeline and returns plain strings that callers shape however they like.

pub mod page_text;

/// Errors that can occur while fetching or normalizing a page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Parsing the response body failed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// `User-Agent` sent with every page fetch.
///
/// Some sites serve stripped-down or blocked responses to non-browser
/// agents, so requests present as a desktop Chrome build.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetches a page body with one GET request.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the request fails or the server
/// responds with a non-2xx status.
pub async fn fetch_page(url: &str) -> Result<String, ScrapeError> {
    let client = reqwest::Client::builder()
        .user_agent(DESKTOP_USER_AGENT)
        .build()?;

    log::debug!("fetching {url}");

    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;

    log::debug!("fetched {} bytes from {url}", body.len());

    Ok(body)
}
