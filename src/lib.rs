// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod evaluate;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod monitor;
pub mod notify;
pub mod series;

// ---- Re-exports for stable public API ----
pub use crate::config::WatcherConfig;
pub use crate::evaluate::{evaluate, DiscountSignal, Evaluation, DEFAULT_MIN_DISCOUNT_PERCENT};
pub use crate::extract::{extract_price, extract_title, ExtractedProduct, TITLE_FALLBACK};
pub use crate::fetch::{FetchedPage, PageFetcher};
pub use crate::history::{HistoryStore, ItemKey, PriceHistoryEntry, DEFAULT_HISTORY_CAP};
pub use crate::monitor::{ingest_page, run_cycle, run_loop, PageObservation, SweepStats};
pub use crate::notify::{Notifier, ParseMode, TelegramNotifier};
pub use crate::series::BoundedSeries;
