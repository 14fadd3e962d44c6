#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF page-text extraction.
//!
//! Banks frequently publish card terms and benefit sheets only as PDF
//! documents. This crate extracts their text page by page using pure-Rust
//! extraction ([`pdf_extract`]), keeping page order so the caller can
//! concatenate into a single document body.

/// Errors specific to PDF extraction.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// PDF text extraction failed (malformed or undecodable payload).
    #[error("PDF extraction error: {0}")]
    Extraction(String),
}

/// Extracts the text of each page from in-memory PDF bytes, in page order.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] if the bytes cannot be decoded as a
/// PDF document.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    log::debug!(
        "extracted {} pages ({} chars) from {} bytes",
        pages.len(),
        pages.iter().map(String::len).sum::<usize>(),
        bytes.len(),
    );

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_an_extraction_error() {
        let result = extract_pages(b"definitely not a pdf");

        let err = result.expect_err("garbage bytes must not decode");
        assert!(matches!(err, PdfError::Extraction(_)));
        assert!(err.to_string().contains("failed to extract text from PDF"));
    }
}
