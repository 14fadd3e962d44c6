//! LLM provider implementations.
//!
//! Supports Anthropic Claude and `OpenAI` via a common trait.

pub mod anthropic;
pub mod openai;

use crate::AiError;

/// Fixed message surfaced when no API credential is configured.
///
/// The pipeline checks credentials before performing any network I/O, so
/// callers see this exact message without a fetch or model call happening.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "no API credential configured; set ANTHROPIC_API_KEY or OPENAI_API_KEY";

/// Trait for single-turn LLM text completion.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Verifies the provider holds a usable credential. Cheap, no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] with [`MISSING_CREDENTIAL_MESSAGE`] if
    /// the credential is empty.
    fn ensure_configured(&self) -> Result<(), AiError>;

    /// Sends one prompt and returns the model's text reply.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails or the provider rejects it.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Creates an LLM provider based on environment variables.
///
/// If `AI_PROVIDER` is explicitly set, uses that provider. Otherwise
/// auto-detects from available credentials:
///
/// 1. `ANTHROPIC_API_KEY` set -> Anthropic Claude
/// 2. `OPENAI_API_KEY` set -> `OpenAI`
///
/// The model name is fixed per provider; `AI_MODEL` overrides it.
///
/// # Errors
///
/// Returns [`AiError::Config`] if no credentials are found or the
/// explicitly requested provider is not configured.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, AiError> {
    let provider = match std::env::var("AI_PROVIDER") {
        Ok(explicit) => explicit,
        Err(_) => detect_provider().ok_or_else(|| AiError::Config {
            message: MISSING_CREDENTIAL_MESSAGE.to_string(),
        })?,
    };

    match provider.to_lowercase().as_str() {
        "anthropic" | "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AiError::Config {
                message: "ANTHROPIC_API_KEY environment variable not set".to_string(),
            })?;
            let model = std::env::var("AI_MODEL")
                .unwrap_or_else(|_| anthropic::DEFAULT_MODEL.to_string());
            Ok(Box::new(anthropic::AnthropicProvider::new(api_key, model)))
        }
        "openai" | "gpt" => {
            let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| AiError::Config {
                message: "OPENAI_API_KEY environment variable not set".to_string(),
            })?;
            let model =
                std::env::var("AI_MODEL").unwrap_or_else(|_| openai::DEFAULT_MODEL.to_string());
            Ok(Box::new(openai::OpenAiProvider::new(api_key, model)))
        }
        other => Err(AiError::Config {
            message: format!("Unknown AI provider: {other}. Use 'anthropic' or 'openai'."),
        }),
    }
}

/// Auto-detects which provider to use based on available credentials.
///
/// Returns `None` when no credential is present so the caller can fail
/// with the fixed missing-credential message before any network I/O.
fn detect_provider() -> Option<String> {
    if std::env::var("ANTHROPIC_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Anthropic (ANTHROPIC_API_KEY found)");
        return Some("anthropic".to_string());
    }

    if std::env::var("OPENAI_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: OpenAI (OPENAI_API_KEY found)");
        return Some("openai".to_string());
    }

    log::warn!(
        "No AI credentials detected. Set ANTHROPIC_API_KEY or OPENAI_API_KEY, \
         or set AI_PROVIDER explicitly."
    );

    None
}
