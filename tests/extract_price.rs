// tests/extract_price.rs
// Strategy ordering and coverage across markup variants.

use meli_price_watcher::extract_price;
use scraper::Html;

fn doc(html: &str) -> Html {
    Html::parse_document(html)
}

#[test]
fn meta_tag_beats_every_other_strategy() {
    // The fixture carries conflicting values for all four strategies; the
    // machine-readable meta tag must win.
    let page = doc(include_str!("fixtures/pdp_full.html"));
    assert_eq!(extract_price(&page), Some(1599.99));
}

#[test]
fn og_amount_meta_is_second_choice() {
    let page = doc(
        r#"<head><meta property="product:price:amount" content="89.90"></head>
           <body><div class="andes-money-amount">
             <span class="andes-money-amount__fraction">77</span>
           </div></body>"#,
    );
    assert_eq!(extract_price(&page), Some(89.90));
}

#[test]
fn malformed_meta_falls_through_to_widget() {
    let page = doc(
        r#"<head><meta itemprop="price" content="not-a-number"></head>
           <body><div class="andes-money-amount">
             <span class="andes-money-amount__fraction">1.299</span>
             <span class="andes-money-amount__cents">90</span>
           </div></body>"#,
    );
    assert_eq!(extract_price(&page), Some(1299.90));
}

#[test]
fn widget_page_resolves_superscript_container() {
    let page = doc(include_str!("fixtures/pdp_widget.html"));
    assert_eq!(extract_price(&page), Some(449.90));
}

#[test]
fn json_ld_offers_object() {
    let page = doc(
        r#"<script type="application/ld+json">
           {"@type": "Product", "offers": {"price": 159.0}}
           </script>"#,
    );
    assert_eq!(extract_price(&page), Some(159.0));
}

#[test]
fn json_ld_top_level_price_as_string() {
    let page = doc(
        r#"<script type="application/ld+json">
           {"@type": "Product", "price": "49.50"}
           </script>"#,
    );
    assert_eq!(extract_price(&page), Some(49.50));
}

#[test]
fn json_ld_broken_block_does_not_stop_the_chain() {
    let page = doc(
        r#"<script type="application/ld+json">{{{</script>
           <div class="price">R$ 10,00</div>"#,
    );
    assert_eq!(extract_price(&page), Some(10.0));
}

#[test]
fn free_text_normalizes_thousands_and_decimals() {
    let page = doc(include_str!("fixtures/pdp_text_only.html"));
    assert_eq!(extract_price(&page), Some(1234.56));
}

#[test]
fn free_text_currency_prefix_wins_within_element() {
    let page = doc(r#"<div class="price">3 unidades por R$ 25,90</div>"#);
    assert_eq!(extract_price(&page), Some(25.90));
}

#[test]
fn no_strategy_match_is_none() {
    let page = doc("<html><body><p>pagina sem preco</p></body></html>");
    assert_eq!(extract_price(&page), None);
}

#[test]
fn zero_prices_are_rejected_everywhere() {
    let page = doc(
        r#"<head><meta itemprop="price" content="0.00"></head>
           <body><div class="price">R$ 0,00</div></body>"#,
    );
    assert_eq!(extract_price(&page), None);
}
