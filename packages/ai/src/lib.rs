#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LLM provider abstraction.
//!
//! Supports Anthropic Claude and `OpenAI` via a common single-turn
//! completion trait ([`providers::LlmProvider`]). The extraction pipeline
//! sends one rendered prompt and receives one text reply; there is no
//! streaming, no tool use, and no multi-turn context.

pub mod providers;

use thiserror::Error;

/// Errors that can occur during model operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the LLM provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error (remote call rejected or failed).
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration error (missing credential, unknown provider).
    #[error("{message}")]
    Config {
        /// Description.
        message: String,
    },
}
