//! Normalizer dispatch over the two document kinds.
//!
//! Website payloads are fetched here (one GET, failing on non-2xx) and
//! stripped to text; PDF bytes are decoded page by page and concatenated
//! without a page separator before the same line cleanup.

use card_scout_extract_models::{NormalizedText, RawDocument};
use card_scout_scraper::page_text;

use crate::ExtractError;

/// Source label used when a page has no usable `<title>`.
pub const UNTITLED_PAGE: &str = "Untitled page";

/// Normalizes a raw document into clean line-oriented text.
///
/// # Errors
///
/// Returns [`ExtractError`] when the fetch returns a non-success status
/// or the payload cannot be decoded. Errors are terminal for the current
/// request; nothing is retried.
pub async fn normalize(raw: &RawDocument) -> Result<NormalizedText, ExtractError> {
    match raw {
        RawDocument::Website { url } => {
            let html = card_scout_scraper::fetch_page(url).await?;
            let page = page_text::normalize_html(&html);

            log::info!("normalized {url} into {} lines", page.lines.len());

            Ok(NormalizedText {
                lines: page.lines,
                source_label: page.title.unwrap_or_else(|| UNTITLED_PAGE.to_owned()),
            })
        }
        RawDocument::Pdf { file_name, bytes } => {
            let pages = card_scout_pdf::extract_pages(bytes)?;
            let body = pages.concat();

            let lines = page_text::clean_lines(&body);

            log::info!(
                "normalized {file_name} ({} pages) into {} lines",
                pages.len(),
                lines.len(),
            );

            Ok(NormalizedText {
                lines,
                source_label: file_name.clone(),
            })
        }
    }
}
