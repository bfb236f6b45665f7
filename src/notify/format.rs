//! Message formatting for the Telegram channel. Pure string work, kept out
//! of the sender so templates are testable without a token.

/// Inputs for a discount alert message.
#[derive(Debug, Clone)]
pub struct DealAlert<'a> {
    pub title: &'a str,
    /// Historical baseline ("from" price).
    pub baseline: f64,
    /// Current ("for" price).
    pub current: f64,
    pub percent: f64,
    /// Link posted to the channel — the configured (affiliate) URL, not the
    /// resolved one.
    pub url: &'a str,
}

const TITLE_MAX_CHARS: usize = 100;

/// Markdown alert: strikethrough old price, bold new price and discount.
pub fn format_deal_alert(alert: &DealAlert<'_>) -> String {
    format!(
        "*OFERTA MERCADO LIVRE!*\n\
         *{title}*\n\n\
         De ~R$ {old}~ por *R$ {new}*\n\
         *Desconto*: {discount:.0}%\n\n\
         [Ver oferta]({link})\n\n\
         Pode acabar a qualquer momento!",
        title = truncate_title(alert.title),
        old = format_money(alert.baseline),
        new = format_money(alert.current),
        discount = alert.percent,
        link = alert.url,
    )
}

/// HTML product announcement; title is entity-escaped, the link is not.
pub fn format_product_post(title: &str, price: f64, url: &str) -> String {
    let title_escaped = html_escape::encode_text(&truncate_title(title)).to_string();
    format!(
        "<b>{title_escaped}</b>\n\n\
         <b>Preco:</b> R$ {price}\n\n\
         <a href=\"{url}\">Comprar agora</a>",
        price = format_money(price),
    )
}

/// Two decimals with comma thousands separators (`1234.5` → `1,234.50`).
pub fn format_money(value: f64) -> String {
    let plain = format!("{value:.2}");
    let (int_part, dec_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{dec_part}")
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let head: String = title.chars().take(TITLE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_grouping() {
        assert_eq!(format_money(1234.5), "1,234.50");
        assert_eq!(format_money(999.0), "999.00");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(0.5), "0.50");
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        let long = "á".repeat(150);
        let t = truncate_title(&long);
        assert_eq!(t.chars().count(), TITLE_MAX_CHARS + 3);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn alert_contains_prices_and_link() {
        let msg = format_deal_alert(&DealAlert {
            title: "Fone Bluetooth",
            baseline: 1299.9,
            current: 899.9,
            percent: 30.77,
            url: "https://mercadolivre.com/sec/abc",
        });
        assert!(msg.contains("De ~R$ 1,299.90~ por *R$ 899.90*"));
        assert!(msg.contains("*Desconto*: 31%"));
        assert!(msg.contains("(https://mercadolivre.com/sec/abc)"));
    }

    #[test]
    fn product_post_escapes_html_in_title() {
        let msg = format_product_post("Cabo <USB> & Carregador", 49.9, "https://x");
        assert!(msg.contains("Cabo &lt;USB&gt; &amp; Carregador"));
        assert!(msg.contains("R$ 49.90"));
    }
}
