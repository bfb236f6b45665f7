//! Price fallback chain.
//!
//! Strategy order reflects decreasing structural reliability; every strategy
//! only accepts a strictly positive parse, so a broken or zeroed value falls
//! through to the next heuristic instead of producing a degenerate signal.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde::Deserialize;

use super::selectors::price as sel;
use super::{element_text, first_success, Strategy};

const STRATEGIES: &[(&str, Strategy<f64>)] = &[
    ("meta-tags", from_meta),
    ("money-widget", from_money_widget),
    ("json-ld", from_json_ld),
    ("text-patterns", from_text_patterns),
];

/// Extract the current price; `None` when no strategy matched (the caller
/// logs and skips the item for this cycle).
pub fn extract_price(doc: &Html) -> Option<f64> {
    first_success(doc, "price", STRATEGIES)
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

/// Strategy 1: price meta tags with a plain `.`-decimal content attribute.
fn from_meta(doc: &Html) -> Option<f64> {
    [&*sel::ITEMPROP_PRICE, &*sel::PRODUCT_PRICE_AMOUNT]
        .into_iter()
        .find_map(|selector| {
            let content = doc.select(selector).next()?.value().attr("content")?;
            content.trim().parse::<f64>().ok().and_then(positive)
        })
}

/// Strategy 2: the money widget splits the amount across child nodes so the
/// integer and cents parts can be styled independently; recombine them.
fn from_money_widget(doc: &Html) -> Option<f64> {
    let container = sel::WIDGET_CONTAINERS
        .iter()
        .find_map(|selector| doc.select(selector).next())?;

    let whole_digits = digits_only(&element_text(container.select(&sel::WIDGET_FRACTION).next()?));
    if whole_digits.is_empty() {
        return None;
    }
    let mut value: f64 = whole_digits.parse().ok()?;

    if let Some(cents_el) = container.select(&sel::WIDGET_CENTS).next() {
        let cents_digits = digits_only(&element_text(cents_el));
        if !cents_digits.is_empty() {
            value += cents_digits.parse::<f64>().ok()? / 100.0;
        }
    }
    positive(value)
}

fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Defensive shapes for embedded structured data. Each block is decoded
// independently; anything that does not fit is skipped, never fatal.

#[derive(Debug, Deserialize)]
struct LdBlock {
    #[serde(default)]
    offers: Option<LdOffers>,
    #[serde(default)]
    price: Option<LdPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdOffers {
    One(LdOffer),
    Many(Vec<LdOffer>),
    /// Unrecognized shape; fails this lookup without rejecting the block.
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct LdOffer {
    #[serde(default)]
    price: Option<LdPrice>,
}

/// `price` appears both as a JSON number and as a numeric string in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdPrice {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LdPrice {
    fn value(&self) -> Option<f64> {
        match self {
            LdPrice::Number(v) => Some(*v),
            LdPrice::Text(s) => s.trim().parse().ok(),
            LdPrice::Other(_) => None,
        }
    }
}

impl LdOffers {
    fn price(&self) -> Option<f64> {
        match self {
            LdOffers::One(offer) => offer.price.as_ref()?.value(),
            LdOffers::Many(offers) => offers.first()?.price.as_ref()?.value(),
            LdOffers::Other(_) => None,
        }
    }
}

/// Strategy 3: `application/ld+json` blocks; offers (object or first array
/// element) are consulted before a top-level price.
fn from_json_ld(doc: &Html) -> Option<f64> {
    for script in doc.select(&sel::LD_JSON_SCRIPTS) {
        let raw = script.text().collect::<String>();
        let Ok(block) = serde_json::from_str::<LdBlock>(&raw) else {
            continue;
        };
        let candidate = block
            .offers
            .as_ref()
            .and_then(LdOffers::price)
            .or_else(|| block.price.as_ref().and_then(LdPrice::value));
        if let Some(value) = candidate.and_then(positive) {
            return Some(value);
        }
    }
    None
}

/// Currency-prefixed token, then a bare `1.234,56`-style token.
static CURRENCY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"R\$\s*([\d.,]+)").expect("valid price regex"));
static BARE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}(?:\.\d{3})*(?:,\d{2})?)").expect("valid price regex"));

/// Strategy 4: free-text last resort over anything that looks like a price
/// element.
fn from_text_patterns(doc: &Html) -> Option<f64> {
    for element in doc.select(&sel::PRICEY_ELEMENTS) {
        let text = element_text(element);
        for pattern in [&*CURRENCY_TOKEN, &*BARE_TOKEN] {
            let Some(captures) = pattern.captures(&text) else {
                continue;
            };
            if let Some(value) = parse_br_number(&captures[1]).and_then(positive) {
                return Some(value);
            }
        }
    }
    None
}

/// Normalize a `.`-thousands / `,`-decimals token (`"1.234,56"` → `1234.56`).
fn parse_br_number(raw: &str) -> Option<f64> {
    raw.replace('.', "").replace(',', ".").parse().ok()
}
