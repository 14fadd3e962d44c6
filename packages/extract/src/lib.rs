#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Card attribute extraction pipeline.
//!
//! Sequences the whole flow for one request: normalize a [`RawDocument`]
//! into clean text, render the fixed extraction prompt, invoke the model,
//! and recover JSON records from its reply. Every stage failure converges
//! to [`ExtractionResult::Failure`] here — no error type escapes the
//! orchestrator, and nothing is retried.

pub mod normalize;
pub mod parse;
pub mod prompt;

use card_scout_ai::AiError;
use card_scout_ai::providers::LlmProvider;
use card_scout_extract_models::{ExtractionResult, NormalizedText, RawDocument};
use card_scout_pdf::PdfError;
use card_scout_scraper::ScrapeError;

/// Errors from the stages feeding the orchestrator.
///
/// `Display` output is surfaced verbatim as the `Failure` reason.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Page fetch or markup normalization failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// PDF decoding failed.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// Model invocation or configuration failed.
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Runs the full pipeline for one document.
///
/// The credential check comes first, before any network I/O: with no
/// usable credential this returns the fixed missing-credential failure
/// without fetching the document or invoking the model. A normalization
/// failure likewise short-circuits before the model is called.
pub async fn extract(raw: &RawDocument, provider: &dyn LlmProvider) -> ExtractionResult {
    if let Err(e) = provider.ensure_configured() {
        return ExtractionResult::failure(e.to_string());
    }

    let text = match normalize::normalize(raw).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("normalization of {} failed: {e}", raw.origin());
            return ExtractionResult::failure(e.to_string());
        }
    };

    extract_normalized(&text, provider).await
}

/// Runs prompt rendering, the model call, and response parsing over
/// already-normalized text.
///
/// Callers that display scraped content before extracting use this to
/// avoid fetching the source twice.
pub async fn extract_normalized(
    text: &NormalizedText,
    provider: &dyn LlmProvider,
) -> ExtractionResult {
    if let Err(e) = provider.ensure_configured() {
        return ExtractionResult::failure(e.to_string());
    }

    let prompt = prompt::build_prompt(text);

    log::info!(
        "requesting extraction for \"{}\" ({} prompt chars)",
        text.source_label,
        prompt.chars().count(),
    );

    let reply = match provider.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("model invocation failed: {e}");
            return ExtractionResult::failure(e.to_string());
        }
    };

    parse::parse_response(&reply)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use card_scout_ai::providers::MISSING_CREDENTIAL_MESSAGE;

    use super::*;

    /// Test double that counts completions instead of calling a network.
    struct MockProvider {
        configured: bool,
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn replying(reply: &str) -> Self {
            Self {
                configured: true,
                reply: Ok(reply.to_owned()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                configured: true,
                reply: Err(message.to_owned()),
                calls: AtomicUsize::new(0),
            }
        }

        fn unconfigured() -> Self {
            Self {
                configured: false,
                reply: Ok(String::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl LlmProvider for MockProvider {
        fn ensure_configured(&self) -> Result<(), AiError> {
            if self.configured {
                Ok(())
            } else {
                Err(AiError::Config {
                    message: MISSING_CREDENTIAL_MESSAGE.to_string(),
                })
            }
        }

        async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(message) => Err(AiError::Provider {
                    message: message.clone(),
                }),
            }
        }
    }

    fn sample_text() -> NormalizedText {
        NormalizedText {
            lines: vec!["Rewards Plus".to_owned(), "Annual fee $95".to_owned()],
            source_label: "Card Offers".to_owned(),
        }
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_before_any_io() {
        let provider = MockProvider::unconfigured();
        let raw = RawDocument::Website {
            url: "http://127.0.0.1:9/unreachable".to_owned(),
        };

        let result = extract(&raw, &provider).await;

        assert_eq!(
            result,
            ExtractionResult::failure(MISSING_CREDENTIAL_MESSAGE)
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn normalization_failure_skips_the_model() {
        let provider = MockProvider::replying("[]");
        let raw = RawDocument::Pdf {
            file_name: "broken.pdf".to_owned(),
            bytes: b"not a pdf".to_vec(),
        };

        let result = extract(&raw, &provider).await;

        let ExtractionResult::Failure {
            reason,
            raw_response,
        } = result
        else {
            panic!("expected failure for malformed PDF");
        };
        assert!(reason.contains("failed to extract text from PDF"));
        assert_eq!(raw_response, None);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn model_reply_is_parsed_into_records() {
        let provider =
            MockProvider::replying(r#"[{"card_name": "Rewards Plus", "annual_fee": "$95"}]"#);

        let result = extract_normalized(&sample_text(), &provider).await;

        let records = result.records().expect("success");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].card_name.as_deref(), Some("Rewards Plus"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn provider_error_message_becomes_the_failure_reason() {
        let provider = MockProvider::failing("quota exceeded");

        let result = extract_normalized(&sample_text(), &provider).await;

        assert_eq!(
            result,
            ExtractionResult::failure("Provider error: quota exceeded")
        );
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn unparseable_reply_carries_raw_response_through() {
        let provider = MockProvider::replying("I could not find any cards on that page.");

        let result = extract_normalized(&sample_text(), &provider).await;

        let ExtractionResult::Failure { raw_response, .. } = result else {
            panic!("expected parse failure");
        };
        assert_eq!(
            raw_response.as_deref(),
            Some("I could not find any cards on that page.")
        );
    }
}
