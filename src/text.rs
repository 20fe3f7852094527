//! HTML-to-text normalization.

use scraper::Html;

/// Strips markup from an HTML fragment and collapses whitespace runs into
/// single spaces. Malformed fragments degrade to whatever text the parser
/// can recover; this never fails.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
