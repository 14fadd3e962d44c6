//! The fixed extraction prompt.
//!
//! A single constant template: source label, truncated content, and the
//! seven-field schema enumeration. Downstream consumers depend on these
//! exact key names, so the template is not configurable.

use card_scout_extract_models::NormalizedText;

/// Maximum number of characters of normalized content embedded in the
/// prompt. The cut is a hard prefix — no summarization, no indicator.
pub const MAX_CONTENT_CHARS: usize = 30_000;

/// Renders the extraction prompt for one normalized document.
///
/// Pure function: no side effects, always succeeds.
#[must_use]
pub fn build_prompt(text: &NormalizedText) -> String {
    let body = text.joined();
    let content = truncate_chars(&body, MAX_CONTENT_CHARS);

    format!(
        r#"The following text was scraped from "{label}". Identify every credit card described in it and return the details as a JSON array with one object per card, using exactly these keys:
- card_name
- issuing_bank
- joining_fee
- annual_fee
- reward_structure
- cashback_offers
- other_attributes (an object holding any further details)

Ignore navigation links, advertisements, and any text unrelated to credit cards. Use null for values the text does not mention. Respond with only the JSON array.

Text:
{content}"#,
        label = text.source_label,
    )
}

/// Returns the prefix of `s` holding at most `max` characters (not bytes).
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
