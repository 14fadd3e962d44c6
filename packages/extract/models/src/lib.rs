#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model for the card-scout extraction pipeline.
//!
//! Every stage of the pipeline speaks these types: an ingested
//! [`RawDocument`] becomes a [`NormalizedText`], which (after one model
//! round-trip) becomes an [`ExtractionResult`] holding zero or more
//! [`CardRecord`]s. Nothing here persists beyond a single request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ingested source document, before normalization.
///
/// Website payloads are fetched during normalization so that a non-success
/// HTTP status surfaces as a normalization failure rather than an ingestion
/// one. PDF bytes arrive from the caller (file-upload analog) and are
/// carried in.
#[derive(Debug, Clone)]
pub enum RawDocument {
    /// A web page to fetch and strip to plain text.
    Website {
        /// Absolute URL of the page.
        url: String,
    },
    /// An uploaded PDF file.
    Pdf {
        /// The uploaded file's name, used as the source label.
        file_name: String,
        /// Raw PDF bytes.
        bytes: Vec<u8>,
    },
}

impl RawDocument {
    /// Returns the document's origin (URL or file name) for log messages.
    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Self::Website { url } => url,
            Self::Pdf { file_name, .. } => file_name,
        }
    }
}

/// Clean line-oriented text derived from a [`RawDocument`].
///
/// Invariants: every line is non-empty after trimming, and line order
/// matches the order of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Non-empty content lines in document order.
    pub lines: Vec<String>,
    /// Page title or uploaded file name.
    pub source_label: String,
}

impl NormalizedText {
    /// Returns the body as a single newline-joined string.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// One extracted credit-card product record.
///
/// The model's output is untrusted: every field besides `other_attributes`
/// is expected but not guaranteed present. Use [`CardRecord::from_value`]
/// to coerce arbitrary model JSON into this shape without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Product name (e.g., "Platinum Travel Card").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    /// Issuing bank or financial institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_bank: Option<String>,
    /// One-time joining/sign-up fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_fee: Option<String>,
    /// Recurring annual fee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_fee: Option<String>,
    /// Reward points / miles structure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_structure: Option<String>,
    /// Cashback offers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashback_offers: Option<String>,
    /// Any further attributes the model chose to report, plus keys it
    /// emitted outside the fixed schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_attributes: Option<BTreeMap<String, serde_json::Value>>,
}

/// The fixed schema field names, in serialization order.
pub const CARD_FIELDS: [&str; 6] = [
    "card_name",
    "issuing_bank",
    "joining_fee",
    "annual_fee",
    "reward_structure",
    "cashback_offers",
];

impl CardRecord {
    /// Coerces an arbitrary JSON value into a `CardRecord`.
    ///
    /// Never fails: string fields are taken verbatim, scalar non-strings
    /// are stringified, composite values are carried as compact JSON text,
    /// and unrecognized object keys are folded into `other_attributes`.
    /// A non-object value becomes a record whose `other_attributes` holds
    /// it under `"value"`.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut map) = value else {
            let mut extra = BTreeMap::new();
            extra.insert("value".to_owned(), value);
            return Self {
                other_attributes: Some(extra),
                ..Self::default()
            };
        };

        let mut record = Self {
            card_name: field_text(map.remove("card_name")),
            issuing_bank: field_text(map.remove("issuing_bank")),
            joining_fee: field_text(map.remove("joining_fee")),
            annual_fee: field_text(map.remove("annual_fee")),
            reward_structure: field_text(map.remove("reward_structure")),
            cashback_offers: field_text(map.remove("cashback_offers")),
            other_attributes: None,
        };

        let mut extra: BTreeMap<String, serde_json::Value> = BTreeMap::new();

        match map.remove("other_attributes") {
            Some(serde_json::Value::Object(nested)) => {
                extra.extend(nested);
            }
            Some(serde_json::Value::Null) | None => {}
            Some(other) => {
                extra.insert("other_attributes".to_owned(), other);
            }
        }

        // Keys the model emitted outside the fixed schema.
        extra.extend(map);

        if !extra.is_empty() {
            record.other_attributes = Some(extra);
        }

        record
    }
}

/// Renders a field value as display text.
///
/// Strings pass through verbatim; other scalars are stringified; arrays
/// and objects are kept as compact JSON so nothing the model said is lost.
fn field_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        scalar @ (serde_json::Value::Bool(_) | serde_json::Value::Number(_)) => {
            Some(scalar.to_string())
        }
        composite => serde_json::to_string(&composite).ok(),
    }
}

/// The outcome of one orchestrated extraction run.
///
/// Every stage failure (fetch, decode, missing credential, model call,
/// response parse) converges to the `Failure` variant; no error type
/// escapes the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// The model reply was recovered as JSON records.
    Success {
        /// Extracted records in reply order.
        records: Vec<CardRecord>,
    },
    /// The run failed; `reason` is human-readable and terminal.
    Failure {
        /// What went wrong.
        reason: String,
        /// The raw model reply, kept for manual inspection when the
        /// failure happened after the model responded.
        raw_response: Option<String>,
    },
}

impl ExtractionResult {
    /// Builds a `Failure` with no raw model response.
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
            raw_response: None,
        }
    }

    /// Returns the extracted records, or `None` for failures.
    #[must_use]
    pub fn records(&self) -> Option<&[CardRecord]> {
        match self {
            Self::Success { records } => Some(records),
            Self::Failure { .. } => None,
        }
    }
}
