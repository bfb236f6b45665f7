//! # Price History Store
//! In-memory map of item key → bounded price series + last-seen title, with
//! JSON persistence helpers.
//!
//! The monitoring loop owns one instance, loads it at startup and saves it
//! after every sweep; nothing here locks or spawns. The on-disk shape stays
//! compatible with a plain `{ "<key>": { "title": ..., "prices": [...] } }`
//! document so histories survive upgrades of the container internals.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::series::BoundedSeries;

/// Default number of price samples retained per item.
pub const DEFAULT_HISTORY_CAP: usize = 200;

/// Short identifier for a monitored item, derived from its configured URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Derive the key from the last path segment of the configured URL
    /// (`https://mercadolivre.com/sec/2THbjvB` → `2THbjvB`).
    ///
    /// Two distinct URLs sharing a trailing segment collide and silently
    /// merge their histories; keys are the caller's responsibility.
    pub fn from_url(raw: &str) -> Self {
        if let Ok(parsed) = url::Url::parse(raw) {
            if let Some(segment) = parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            {
                return Self(segment.to_string());
            }
        }
        // Not an absolute URL; fall back to a raw split.
        let tail = raw
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(raw);
        Self(tail.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item's rolling observation record.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistoryEntry {
    pub key: ItemKey,
    /// Last-seen title; titles legitimately change (variant selection).
    pub title: String,
    /// Chronological, append-only, capped (oldest evicted first).
    pub prices: BoundedSeries,
}

/// Serialized form of one entry; the key lives in the surrounding map.
#[derive(Debug, Serialize, Deserialize)]
struct EntryOnDisk {
    title: String,
    prices: Vec<f64>,
}

/// Owned map of every monitored item's history.
#[derive(Debug)]
pub struct HistoryStore {
    entries: HashMap<ItemKey, PriceHistoryEntry>,
    cap: usize,
}

impl HistoryStore {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: HashMap::new(),
            cap: cap.max(1),
        }
    }

    pub fn get(&self, key: &ItemKey) -> Option<&PriceHistoryEntry> {
        self.entries.get(key)
    }

    /// Fold one observation into the store: create the entry on first sight,
    /// append the price (evicting the oldest past the cap) and refresh the
    /// title. Returns the updated entry.
    pub fn record(&mut self, key: ItemKey, title: &str, price: f64) -> &PriceHistoryEntry {
        let cap = self.cap;
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| PriceHistoryEntry {
                key,
                title: String::new(),
                prices: BoundedSeries::new(cap),
            });
        entry.prices.push(price);
        entry.title = title.to_string();
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceHistoryEntry> {
        self.entries.values()
    }

    /// Serialize to the on-disk JSON document (keys sorted for stable diffs).
    pub fn to_json(&self) -> Result<String> {
        let map: BTreeMap<&str, EntryOnDisk> = self
            .entries
            .values()
            .map(|e| {
                (
                    e.key.as_str(),
                    EntryOnDisk {
                        title: e.title.clone(),
                        prices: e.prices.values(),
                    },
                )
            })
            .collect();
        serde_json::to_string_pretty(&map).context("serializing price history")
    }

    /// Rebuild a store from the on-disk document, re-applying `cap`.
    pub fn from_json(cap: usize, raw: &str) -> Result<Self> {
        let map: BTreeMap<String, EntryOnDisk> =
            serde_json::from_str(raw).context("parsing price history json")?;
        let mut store = Self::new(cap);
        for (key, disk) in map {
            let key = ItemKey::new(key);
            store.entries.insert(
                key.clone(),
                PriceHistoryEntry {
                    key,
                    title: disk.title,
                    prices: BoundedSeries::from_values(cap, disk.prices),
                },
            );
        }
        Ok(store)
    }

    /// Load from `path`; a missing file yields an empty store.
    pub fn load(cap: usize, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(cap));
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading price history from {}", path.display()))?;
        Self::from_json(cap, &raw)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("writing price history to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_url_takes_last_segment() {
        let k = ItemKey::from_url("https://mercadolivre.com/sec/2THbjvB");
        assert_eq!(k.as_str(), "2THbjvB");
    }

    #[test]
    fn key_from_url_ignores_trailing_slash_and_query() {
        assert_eq!(
            ItemKey::from_url("https://mercadolivre.com/sec/abc/").as_str(),
            "abc"
        );
        assert_eq!(
            ItemKey::from_url("https://mercadolivre.com/sec/abc?ref=x").as_str(),
            "abc"
        );
    }

    #[test]
    fn key_from_non_url_falls_back_to_split() {
        assert_eq!(ItemKey::from_url("sec/xyz").as_str(), "xyz");
    }

    #[test]
    fn record_creates_then_appends_and_refreshes_title() {
        let mut store = HistoryStore::new(10);
        let key = ItemKey::new("abc");
        store.record(key.clone(), "Widget", 100.0);
        let entry = store.record(key.clone(), "Widget v2", 90.0);
        assert_eq!(entry.title, "Widget v2");
        assert_eq!(entry.prices.values(), vec![100.0, 90.0]);
        assert_eq!(store.len(), 1);
    }
}
