//! # Watcher Configuration
//! Monitoring parameters come from a TOML file; secrets (bot token, chat id)
//! stay in the environment and are read where they are used.
//!
//! Resolution order: `$WATCHER_CONFIG_PATH`, then `watcher.toml`, then
//! `config/watcher.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::evaluate::DEFAULT_MIN_DISCOUNT_PERCENT;
use crate::history::DEFAULT_HISTORY_CAP;

pub const ENV_CONFIG_PATH: &str = "WATCHER_CONFIG_PATH";

const FALLBACK_PATHS: &[&str] = &["watcher.toml", "config/watcher.toml"];

fn default_min_discount_percent() -> f64 {
    DEFAULT_MIN_DISCOUNT_PERCENT
}
fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}
fn default_interval_secs() -> u64 {
    1800
}
fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_history_path() -> PathBuf {
    PathBuf::from("ml_history.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatcherConfig {
    /// Product pages to monitor; the last path segment keys the history.
    pub product_urls: Vec<String>,

    /// Percent drop against the historical baseline that triggers an alert.
    #[serde(default = "default_min_discount_percent")]
    pub min_discount_percent: f64,

    /// Price samples retained per item (oldest evicted first).
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Seconds between sweeps.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Where the history JSON document lives.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Post every configured product to the channel once at startup.
    #[serde(default)]
    pub announce_on_start: bool,
}

impl WatcherConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Env override first, then the fallback locations.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to a non-existent path"));
            }
            return Self::load_from(&pb);
        }
        for candidate in FALLBACK_PATHS {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from(&pb);
            }
        }
        Err(anyhow!(
            "no config file found (set {ENV_CONFIG_PATH} or create watcher.toml)"
        ))
    }

    pub fn validate(&self) -> Result<()> {
        if self.product_urls.is_empty() {
            return Err(anyhow!("product_urls is empty; nothing to monitor"));
        }
        if !self.min_discount_percent.is_finite() || self.min_discount_percent < 0.0 {
            return Err(anyhow!(
                "min_discount_percent must be a non-negative number"
            ));
        }
        if self.interval_secs == 0 {
            return Err(anyhow!("interval_secs must be at least 1"));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg: WatcherConfig =
            toml::from_str(r#"product_urls = ["https://mercadolivre.com/sec/abc"]"#).unwrap();
        assert_eq!(cfg.min_discount_percent, 20.0);
        assert_eq!(cfg.history_cap, 200);
        assert_eq!(cfg.interval_secs, 1800);
        assert_eq!(cfg.history_path, PathBuf::from("ml_history.json"));
        assert!(!cfg.announce_on_start);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_url_list_fails_validation() {
        let cfg: WatcherConfig = toml::from_str("product_urls = []").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_from_reads_overrides() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
product_urls = ["https://mercadolivre.com/sec/abc"]
min_discount_percent = 15.0
interval_secs = 600
announce_on_start = true
"#
        )
        .unwrap();
        let cfg = WatcherConfig::load_from(f.path()).unwrap();
        assert_eq!(cfg.min_discount_percent, 15.0);
        assert_eq!(cfg.interval_secs, 600);
        assert!(cfg.announce_on_start);
    }

    #[serial_test::serial]
    #[test]
    fn env_override_must_exist() {
        std::env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
        assert!(WatcherConfig::load_default().is_err());
        std::env::remove_var(ENV_CONFIG_PATH);
    }
}
