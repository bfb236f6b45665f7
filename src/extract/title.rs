//! Title fallback chain. Total: always yields something displayable.

use scraper::Html;

use super::selectors::title as sel;
use super::{element_text, first_success, Strategy};

/// Placeholder when every strategy misses; never an empty string.
pub const TITLE_FALLBACK: &str = "Produto Mercado Livre";

const STRATEGIES: &[(&str, Strategy<String>)] = &[
    ("pdp-heading", from_pdp_heading),
    ("title-class-heading", from_any_title_heading),
    ("og-title", from_og_meta),
    ("document-title", from_document_title),
];

/// Extract the product title, falling back to a fixed placeholder.
pub fn extract_title(doc: &Html) -> String {
    first_success(doc, "title", STRATEGIES).unwrap_or_else(|| TITLE_FALLBACK.to_string())
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn from_pdp_heading(doc: &Html) -> Option<String> {
    doc.select(&sel::PDP_HEADING)
        .next()
        .map(element_text)
        .and_then(non_empty)
}

fn from_any_title_heading(doc: &Html) -> Option<String> {
    doc.select(&sel::ANY_TITLE_HEADING)
        .next()
        .map(element_text)
        .and_then(non_empty)
}

fn from_og_meta(doc: &Html) -> Option<String> {
    doc.select(&sel::OG_TITLE)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .and_then(non_empty)
}

fn from_document_title(doc: &Html) -> Option<String> {
    doc.select(&sel::DOCUMENT_TITLE)
        .next()
        .map(element_text)
        .and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdp_heading_beats_og_meta() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content="OG name"></head>
               <body><h1 class="ui-pdp-title"> PDP name </h1></body></html>"#,
        );
        assert_eq!(extract_title(&doc), "PDP name");
    }

    #[test]
    fn empty_heading_falls_through() {
        let doc = Html::parse_document(
            r#"<html><head><title>Doc title</title></head>
               <body><h1 class="ui-pdp-title">   </h1></body></html>"#,
        );
        assert_eq!(extract_title(&doc), "Doc title");
    }

    #[test]
    fn placeholder_when_nothing_matches() {
        let doc = Html::parse_document("<html><body><p>bare page</p></body></html>");
        assert_eq!(extract_title(&doc), TITLE_FALLBACK);
    }
}
