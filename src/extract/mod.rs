//! # Field Extractors
//! Pure, selector-driven extraction of product fields from a parsed page.
//!
//! Product pages carry no stable API, so each field is pulled by an ordered
//! list of independent heuristics — machine-readable metadata first,
//! semantically-marked DOM next, free-text regex as last resort. The first
//! strategy that produces a usable value wins; nothing is merged or averaged
//! across strategies. Extractors borrow the document read-only and never
//! touch I/O, which keeps every heuristic unit-testable on a string fixture.

mod price;
mod selectors;
mod title;

pub use price::extract_price;
pub use title::{extract_title, TITLE_FALLBACK};

use scraper::{ElementRef, Html};
use tracing::debug;

/// Immutable result of one extraction pass over a fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedProduct {
    pub title: String,
    /// Non-negative monetary amount.
    pub price: f64,
    /// Final URL after redirects, for traceability.
    pub source_url: String,
}

/// One field heuristic: inspect the document, yield a value or miss.
pub(crate) type Strategy<T> = fn(&Html) -> Option<T>;

/// Short-circuiting fold over an ordered strategy list: the first strategy
/// to return a value decides the field. Keeps the priority order an
/// explicit, inspectable table instead of nested conditionals.
pub(crate) fn first_success<T>(
    doc: &Html,
    field: &'static str,
    strategies: &[(&'static str, Strategy<T>)],
) -> Option<T> {
    strategies.iter().find_map(|(name, run)| {
        let value = run(doc);
        if value.is_some() {
            debug!(field, strategy = name, "extraction strategy matched");
        }
        value
    })
}

/// Collected, whitespace-trimmed text of an element.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
