//! # Notifications
//! The delivery seam: a `Notifier` trait so the monitoring loop can be
//! exercised in tests without a live channel, plus the Telegram
//! implementation and pure message formatting.

pub mod format;
pub mod telegram;

pub use format::{format_deal_alert, format_product_post, DealAlert};
pub use telegram::TelegramNotifier;

use anyhow::Result;

/// How the channel should interpret the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    Html,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::Html => "HTML",
        }
    }
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str, mode: ParseMode) -> Result<()>;
}
