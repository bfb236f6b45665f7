//! # Monitoring Cycle
//! Composition root: fetch → parse → extract → record → evaluate → notify.
//!
//! Every failure mode degrades to "skip this item this sweep"; nothing here
//! aborts the run. The store is owned by the caller, loaded once at startup
//! and saved after each sweep.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use scraper::Html;
use tracing::{debug, error, info, warn};

use crate::config::WatcherConfig;
use crate::evaluate::{evaluate, Evaluation};
use crate::extract::{extract_price, extract_title, ExtractedProduct};
use crate::fetch::{FetchedPage, PageFetcher};
use crate::history::{HistoryStore, ItemKey};
use crate::notify::{format_deal_alert, format_product_post, DealAlert, Notifier, ParseMode};

/// Outcome of folding one fetched page into the store.
#[derive(Debug, Clone, PartialEq)]
pub enum PageObservation {
    /// No strategy matched a price; nothing was recorded.
    PriceMissing { title: String },
    Observed {
        product: ExtractedProduct,
        evaluation: Evaluation,
    },
}

/// Parse the page, extract the fields, record the observation and evaluate
/// it. Pure apart from the store mutation, so sweeps are testable on
/// fixture HTML without a network.
pub fn ingest_page(
    store: &mut HistoryStore,
    key: &ItemKey,
    page: &FetchedPage,
    min_discount_percent: f64,
) -> PageObservation {
    let doc = Html::parse_document(&page.body);
    let title = extract_title(&doc);
    let Some(price) = extract_price(&doc) else {
        return PageObservation::PriceMissing { title };
    };

    let entry = store.record(key.clone(), &title, price);
    let evaluation = evaluate(entry, min_discount_percent);
    PageObservation::Observed {
        product: ExtractedProduct {
            title,
            price,
            source_url: page.final_url.clone(),
        },
        evaluation,
    }
}

/// Per-sweep counters for the summary log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    pub checked: usize,
    pub skipped: usize,
    pub alerts: usize,
}

/// One sweep over every configured product, sequentially.
pub async fn run_cycle(
    cfg: &WatcherConfig,
    fetcher: &PageFetcher,
    notifier: &dyn Notifier,
    store: &mut HistoryStore,
) -> SweepStats {
    let mut stats = SweepStats::default();

    for url in &cfg.product_urls {
        let key = ItemKey::from_url(url);
        debug!(item = %key, "checking product");

        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(item = %key, error = %format!("{e:#}"), "fetch failed");
                stats.skipped += 1;
                continue;
            }
        };

        match ingest_page(store, &key, &page, cfg.min_discount_percent) {
            PageObservation::PriceMissing { title } => {
                warn!(item = %key, title = %title, "no price found on page");
                stats.skipped += 1;
            }
            PageObservation::Observed {
                product,
                evaluation,
            } => {
                stats.checked += 1;
                match evaluation {
                    Evaluation::Insufficient => {
                        debug!(item = %key, "waiting for more price samples");
                    }
                    Evaluation::Signal(sig) => {
                        info!(
                            item = %key,
                            current = sig.current,
                            baseline = sig.baseline,
                            percent = sig.percent,
                            "price evaluated"
                        );
                        if sig.alert {
                            let msg = format_deal_alert(&DealAlert {
                                title: &product.title,
                                baseline: sig.baseline,
                                current: sig.current,
                                percent: sig.percent,
                                url,
                            });
                            match notifier.send(&msg, ParseMode::Markdown).await {
                                Ok(()) => {
                                    info!(item = %key, "discount alert sent");
                                    stats.alerts += 1;
                                }
                                Err(e) => {
                                    error!(item = %key, error = %format!("{e:#}"), "alert delivery failed");
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    stats
}

/// Post every configured product to the channel once (startup announcement).
/// Returns the number of successful posts.
pub async fn announce_all(
    cfg: &WatcherConfig,
    fetcher: &PageFetcher,
    notifier: &dyn Notifier,
) -> usize {
    let mut posted = 0usize;

    for url in &cfg.product_urls {
        let key = ItemKey::from_url(url);
        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(item = %key, error = %format!("{e:#}"), "announce fetch failed");
                continue;
            }
        };

        // Scoped so the parsed document is gone before the send await.
        let (title, price) = {
            let doc = Html::parse_document(&page.body);
            (extract_title(&doc), extract_price(&doc))
        };
        let Some(price) = price else {
            warn!(item = %key, "announce skipped, no price on page");
            continue;
        };

        let msg = format_product_post(&title, price, url);
        match notifier.send(&msg, ParseMode::Html).await {
            Ok(()) => {
                info!(item = %key, "product posted");
                posted += 1;
            }
            Err(e) => warn!(item = %key, error = %format!("{e:#}"), "product post failed"),
        }

        // Stay friendly with the Bot API flood limits.
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    info!(posted, total = cfg.product_urls.len(), "catalog announcement done");
    posted
}

/// Sweep forever: tick, cycle, persist, summarize. The first sweep runs
/// immediately; the history file is rewritten after every sweep.
pub async fn run_loop(
    cfg: &WatcherConfig,
    fetcher: &PageFetcher,
    notifier: &dyn Notifier,
    store: &mut HistoryStore,
) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.interval_secs));

    loop {
        ticker.tick().await;
        info!(started = %Utc::now().format("%Y-%m-%d %H:%M:%S"), "sweep started");

        let stats = run_cycle(cfg, fetcher, notifier, store).await;

        if let Err(e) = store.save(&cfg.history_path) {
            error!(error = %format!("{e:#}"), "saving history failed");
        }
        info!(
            checked = stats.checked,
            skipped = stats.skipped,
            alerts = stats.alerts,
            items = store.len(),
            "sweep finished"
        );
    }
}
