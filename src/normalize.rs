//! HTML-to-text conversion for snippet fields.

use scraper::Html;

/// Converts an HTML fragment to plain text.
///
/// Tags are dropped and entities decoded; text nodes are concatenated in
/// document order.
pub fn normalize_html(fragment: &str) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect()
}
