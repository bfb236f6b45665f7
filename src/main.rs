//! Mercado Livre price watcher — binary entrypoint.
//! Wires config, history, fetcher and the Telegram channel, then sweeps on
//! a timer. See `README.md` for setup.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meli_price_watcher::config::WatcherConfig;
use meli_price_watcher::fetch::PageFetcher;
use meli_price_watcher::history::HistoryStore;
use meli_price_watcher::monitor;
use meli_price_watcher::notify::TelegramNotifier;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = WatcherConfig::load_default()?;
    let fetcher = PageFetcher::with_timeout(cfg.fetch_timeout())?;
    let notifier = TelegramNotifier::from_env()?;
    let mut store = HistoryStore::load(cfg.history_cap, &cfg.history_path)?;

    info!(
        products = cfg.product_urls.len(),
        min_discount_percent = cfg.min_discount_percent,
        interval_secs = cfg.interval_secs,
        known_items = store.len(),
        "price watcher started"
    );

    if cfg.announce_on_start {
        monitor::announce_all(&cfg, &fetcher, &notifier).await;
    }

    monitor::run_loop(&cfg, &fetcher, &notifier, &mut store).await
}
