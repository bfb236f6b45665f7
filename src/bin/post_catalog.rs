//! One-shot utility: post every configured product to the channel, then
//! exit. Useful for seeding a channel or checking the bot token wiring.

use meli_price_watcher::config::WatcherConfig;
use meli_price_watcher::fetch::PageFetcher;
use meli_price_watcher::monitor;
use meli_price_watcher::notify::TelegramNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = WatcherConfig::load_default()?;
    let fetcher = PageFetcher::with_timeout(cfg.fetch_timeout())?;
    let notifier = TelegramNotifier::from_env()?;

    let posted = monitor::announce_all(&cfg, &fetcher, &notifier).await;
    println!("{posted} products posted");
    Ok(())
}
