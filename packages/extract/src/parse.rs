//! Best-effort JSON recovery from a free-text model reply.
//!
//! Three stages, each attempted only when the previous fails:
//! 1. strip code-fence markers and parse strictly;
//! 2. greedy brace capture (first `{` through last `}`, no balance
//!    checking) over the original reply, parsed strictly;
//! 3. a `Failure` carrying the raw reply for manual inspection.
//!
//! Deterministic for identical input; the model is never re-invoked here.

use card_scout_extract_models::{CardRecord, ExtractionResult};
use regex::Regex;

/// Reason reported when no stage recovers JSON.
pub const PARSE_FAILURE_REASON: &str = "could not parse response as JSON";

/// Reason reported when the reply parses to a non-container value.
pub const NOT_RECORDS_REASON: &str = "response JSON is not an object or array";

/// Recovers card records from a raw model reply.
#[must_use]
pub fn parse_response(reply: &str) -> ExtractionResult {
    let stripped = reply.replace("```json", "").replace("```", "");
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(stripped.trim()) {
        return coerce_records(value, reply);
    }

    let blob_re = Regex::new(r"(?s)\{.*\}").unwrap_or_else(|_| unreachable!());
    if let Some(blob) = blob_re.find(reply)
        && let Ok(value) = serde_json::from_str::<serde_json::Value>(blob.as_str())
    {
        log::debug!("reply recovered via brace capture");
        return coerce_records(value, reply);
    }

    ExtractionResult::Failure {
        reason: PARSE_FAILURE_REASON.to_owned(),
        raw_response: Some(reply.to_owned()),
    }
}

/// Shapes a parsed JSON value into the record list.
///
/// A top-level array maps element-wise; a bare object (common model reply
/// for single-card pages) is wrapped as a one-element list; anything else
/// has no records to recover and fails with the raw reply attached.
fn coerce_records(value: serde_json::Value, reply: &str) -> ExtractionResult {
    match value {
        serde_json::Value::Array(items) => ExtractionResult::Success {
            records: items.into_iter().map(CardRecord::from_value).collect(),
        },
        object @ serde_json::Value::Object(_) => ExtractionResult::Success {
            records: vec![CardRecord::from_value(object)],
        },
        _ => ExtractionResult::Failure {
            reason: NOT_RECORDS_REASON.to_owned(),
            raw_response: Some(reply.to_owned()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_object_parses_and_wraps_as_singleton() {
        let result = parse_response("```json\n{\"a\":1}\n```");

        let records = result.records().expect("fenced object must parse");
        assert_eq!(records.len(), 1);
        let extra = records[0].other_attributes.as_ref().expect("extras");
        assert_eq!(extra["a"], 1);
    }

    #[test]
    fn fenced_array_parses_in_order() {
        let reply = r#"```json
[
  {"card_name": "Alpha", "annual_fee": "$0"},
  {"card_name": "Beta", "annual_fee": "$95"}
]
```"#;

        let result = parse_response(reply);

        let records = result.records().expect("fenced array must parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].card_name.as_deref(), Some("Alpha"));
        assert_eq!(records[1].card_name.as_deref(), Some("Beta"));
    }

    #[test]
    fn bare_json_without_fences_parses() {
        let result = parse_response(r#"[{"card_name": "Gamma"}]"#);

        let records = result.records().expect("bare JSON must parse");
        assert_eq!(records[0].card_name.as_deref(), Some("Gamma"));
    }

    #[test]
    fn surrounding_noise_falls_back_to_brace_capture() {
        let result = parse_response("noise {\"a\":1} more noise");

        let records = result.records().expect("brace capture must recover");
        assert_eq!(records.len(), 1);
        let extra = records[0].other_attributes.as_ref().expect("extras");
        assert_eq!(extra["a"], 1);
    }

    #[test]
    fn brace_capture_recovers_object_from_prose_around_fences() {
        let reply = "Here is the card you asked about:\n```json\n{\"card_name\": \"Delta\"}\n```\nLet me know if you need more.";

        let result = parse_response(reply);

        let records = result.records().expect("object must be recovered");
        assert_eq!(records[0].card_name.as_deref(), Some("Delta"));
    }

    #[test]
    fn greedy_capture_spans_first_to_last_brace() {
        // Two separate objects: the greedy span "{...} y {...}" is not
        // valid JSON, so recovery fails rather than returning either one.
        let result = parse_response("x {\"a\":1} y {\"b\":2} z");

        let ExtractionResult::Failure { reason, .. } = result else {
            panic!("greedy capture must not cherry-pick an object");
        };
        assert_eq!(reason, PARSE_FAILURE_REASON);
    }

    #[test]
    fn unparseable_reply_fails_with_raw_response() {
        let result = parse_response("not json at all");

        assert_eq!(
            result,
            ExtractionResult::Failure {
                reason: PARSE_FAILURE_REASON.to_owned(),
                raw_response: Some("not json at all".to_owned()),
            }
        );
    }

    #[test]
    fn non_container_json_fails_with_raw_response() {
        let result = parse_response("42");

        assert_eq!(
            result,
            ExtractionResult::Failure {
                reason: NOT_RECORDS_REASON.to_owned(),
                raw_response: Some("42".to_owned()),
            }
        );
    }

    #[test]
    fn empty_array_is_a_success_with_no_records() {
        let result = parse_response("[]");
        assert_eq!(result.records(), Some(&[][..]));
    }

    #[test]
    fn identical_input_is_deterministic() {
        let reply = "maybe {\"card_name\": \"Echo\"} trailing";

        assert_eq!(parse_response(reply), parse_response(reply));
    }
}
