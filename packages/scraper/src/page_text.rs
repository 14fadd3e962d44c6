//! HTML-to-text normalization.
//!
//! Converts raw markup into the clean line-oriented form the extraction
//! pipeline consumes: script and style subtrees are discarded wholesale,
//! remaining text is split into lines, and each line is split on runs of
//! two-or-more spaces into trimmed, non-empty phrases in document order.

use scraper::{Html, Selector};

/// A page reduced to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPage {
    /// Non-empty content lines in document order.
    pub lines: Vec<String>,
    /// Text of the `<title>` element, if present and non-empty.
    pub title: Option<String>,
}

/// Normalizes an HTML document into clean content lines plus its title.
#[must_use]
pub fn normalize_html(html: &str) -> NormalizedPage {
    let document = Html::parse_document(html);

    NormalizedPage {
        lines: clean_lines(&visible_text(&document)),
        title: page_title(&document),
    }
}

/// Collects the document's text content, excluding `<script>` and
/// `<style>` subtrees entirely.
fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        if let scraper::Node::Text(fragment) = node.value() {
            let excluded = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| matches!(el.name(), "script" | "style"))
            });
            if !excluded {
                text.push_str(&fragment.text);
            }
        }
    }

    text
}

/// Returns the trimmed `<title>` text, or `None` when absent or empty.
fn page_title(document: &Html) -> Option<String> {
    let title_sel = Selector::parse("title").ok()?;
    let element = document.select(&title_sel).next()?;
    let title = element.text().collect::<String>().trim().to_owned();

    if title.is_empty() { None } else { Some(title) }
}

/// Splits text into trimmed, non-empty phrases.
///
/// Each source line is trimmed, then split on runs of two-or-more spaces
/// (inline gaps left behind by adjacent markup elements), and every
/// resulting phrase is trimmed again. Empty phrases are dropped; order is
/// preserved. Running this over its own joined output is a no-op.
#[must_use]
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_and_style_content_never_appears() {
        let html = r"<html><head>
            <title>Offers</title>
            <style>body { color: red; }</style>
            <script>var tracking = 'secret';</script>
        </head><body>
            <p>Visible paragraph</p>
            <script>console.log('inline');</script>
        </body></html>";

        let page = normalize_html(html);
        let joined = page.lines.join("\n");

        assert!(joined.contains("Visible paragraph"));
        assert!(!joined.contains("tracking"));
        assert!(!joined.contains("secret"));
        assert!(!joined.contains("color: red"));
        assert!(!joined.contains("console.log"));
    }

    #[test]
    fn title_is_extracted() {
        let page = normalize_html("<html><head><title> Card Offers </title></head></html>");
        assert_eq!(page.title.as_deref(), Some("Card Offers"));
    }

    #[test]
    fn missing_or_empty_title_is_none() {
        assert_eq!(normalize_html("<html><body>hi</body></html>").title, None);
        assert_eq!(
            normalize_html("<html><head><title>  </title></head></html>").title,
            None
        );
    }

    #[test]
    fn lines_are_non_empty_and_ordered() {
        let html = "<html><body><div>First</div>\n\n  <div>Second</div>\n<div> </div></body></html>";
        let page = normalize_html(html);

        assert_eq!(page.lines, vec!["First", "Second"]);
        assert!(page.lines.iter().all(|l| !l.trim().is_empty()));
    }

    #[test]
    fn double_space_runs_split_into_phrases() {
        let lines = clean_lines("  Annual fee  $95   Joining fee  $0  ");
        assert_eq!(lines, vec!["Annual fee", "$95", "Joining fee", "$0"]);
    }

    #[test]
    fn clean_lines_is_idempotent() {
        let first = clean_lines("  alpha  beta \n\n gamma\n   ");
        let second = clean_lines(&first.join("\n"));
        assert_eq!(first, second);
    }
}
