//! CSS selectors for Mercado Livre product pages.
//!
//! Every selector used by the extractors lives here, compiled once. Update
//! this file when the site changes its markup: capture an HTML sample, adjust
//! the selector, add a fixture under `tests/fixtures/`.

use once_cell::sync::Lazy;
use scraper::Selector;

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid css selector")
}

/// Selectors for the title fallback chain, most reliable first.
pub mod title {
    use super::*;

    /// Product-detail-page heading.
    pub static PDP_HEADING: Lazy<Selector> = Lazy::new(|| sel("h1.ui-pdp-title"));

    /// Any h1 whose class mentions "title".
    pub static ANY_TITLE_HEADING: Lazy<Selector> = Lazy::new(|| sel(r#"h1[class*="title"]"#));

    /// Open Graph title meta tag.
    pub static OG_TITLE: Lazy<Selector> = Lazy::new(|| sel(r#"meta[property="og:title"]"#));

    /// Document title element.
    pub static DOCUMENT_TITLE: Lazy<Selector> = Lazy::new(|| sel("title"));
}

/// Selectors for the price fallback chain.
pub mod price {
    use super::*;

    /// Machine-readable price meta tags, checked in order.
    pub static ITEMPROP_PRICE: Lazy<Selector> = Lazy::new(|| sel(r#"meta[itemprop="price"]"#));
    pub static PRODUCT_PRICE_AMOUNT: Lazy<Selector> =
        Lazy::new(|| sel(r#"meta[property="product:price:amount"]"#));

    /// Money-widget containers, most specific first. The amount is split
    /// across child nodes so integer and cents can be styled independently.
    pub static WIDGET_CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
        vec![
            sel(".ui-pdp-price__second-line .andes-money-amount"),
            sel(".andes-money-amount--cents-superscript"),
            sel(".andes-money-amount"),
        ]
    });

    /// Integer part of the amount within a widget container.
    pub static WIDGET_FRACTION: Lazy<Selector> = Lazy::new(|| sel(".andes-money-amount__fraction"));

    /// Optional cents part within a widget container.
    pub static WIDGET_CENTS: Lazy<Selector> = Lazy::new(|| sel(".andes-money-amount__cents"));

    /// Embedded structured-data blocks.
    pub static LD_JSON_SCRIPTS: Lazy<Selector> =
        Lazy::new(|| sel(r#"script[type="application/ld+json"]"#));

    /// Loose "looks like a price" elements for the free-text last resort.
    pub static PRICEY_ELEMENTS: Lazy<Selector> =
        Lazy::new(|| sel(r#".price, .ui-pdp-price, [class*="price"]"#));
}
