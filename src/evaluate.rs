//! # Discount Evaluator
//! Pure, testable logic that maps a price history to an alert/no-alert
//! signal. No I/O, suitable for unit tests and offline evaluation.
//!
//! The baseline is the arithmetic mean of *all prior* observations, not just
//! the immediately preceding one: a temporary spike cannot mask a genuine
//! discount, and a single erroneous low reading only distorts the baseline
//! once it is no longer the current sample.

use serde::Serialize;

use crate::history::PriceHistoryEntry;

/// Minimum percent drop against the baseline that triggers an alert.
pub const DEFAULT_MIN_DISCOUNT_PERCENT: f64 = 20.0;

/// Derived discount figures for one observation; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscountSignal {
    /// Mean of every recorded price except the current one.
    pub baseline: f64,
    /// Most recent recorded price.
    pub current: f64,
    /// Drop against the baseline, in percent (negative when price rose).
    pub percent: f64,
    pub alert: bool,
}

/// Outcome of evaluating an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Signal(DiscountSignal),
    /// Not enough data for a decision — a valid transient state, not an
    /// error. Covers histories shorter than two samples and a zero baseline.
    Insufficient,
}

impl Evaluation {
    pub fn signal(&self) -> Option<DiscountSignal> {
        match self {
            Evaluation::Signal(s) => Some(*s),
            Evaluation::Insufficient => None,
        }
    }
}

/// Evaluate the entry's latest observation against its history.
pub fn evaluate(entry: &PriceHistoryEntry, min_discount_percent: f64) -> Evaluation {
    let prices = &entry.prices;
    if prices.len() < 2 {
        return Evaluation::Insufficient;
    }
    let Some(current) = prices.last() else {
        return Evaluation::Insufficient;
    };

    let prior_count = prices.len() - 1;
    let prior_sum: f64 = prices.iter().take(prior_count).sum();
    let baseline = prior_sum / prior_count as f64;
    if baseline <= 0.0 {
        // Degenerate history (free items, extraction glitches); a percentage
        // against it is meaningless.
        return Evaluation::Insufficient;
    }

    let percent = (baseline - current) / baseline * 100.0;
    Evaluation::Signal(DiscountSignal {
        baseline,
        current,
        percent,
        alert: percent >= min_discount_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryStore, ItemKey};

    fn entry_with(prices: &[f64]) -> PriceHistoryEntry {
        let mut store = HistoryStore::new(200);
        let key = ItemKey::new("item");
        for p in prices {
            store.record(key.clone(), "Item", *p);
        }
        store.get(&key).expect("entry recorded").clone()
    }

    #[test]
    fn mean_baseline_and_threshold_alert() {
        let entry = entry_with(&[100.0, 100.0, 100.0, 80.0]);
        let Evaluation::Signal(sig) = evaluate(&entry, DEFAULT_MIN_DISCOUNT_PERCENT) else {
            panic!("expected a signal");
        };
        assert_eq!(sig.baseline, 100.0);
        assert_eq!(sig.current, 80.0);
        assert_eq!(sig.percent, 20.0);
        assert!(sig.alert, "20% drop meets the 20% threshold");
    }

    #[test]
    fn below_threshold_is_quiet() {
        let entry = entry_with(&[100.0, 85.0]);
        let sig = evaluate(&entry, 20.0).signal().expect("signal");
        assert_eq!(sig.percent, 15.0);
        assert!(!sig.alert);
    }

    #[test]
    fn price_rise_yields_negative_percent() {
        let entry = entry_with(&[100.0, 120.0]);
        let sig = evaluate(&entry, 20.0).signal().expect("signal");
        assert!(sig.percent < 0.0);
        assert!(!sig.alert);
    }

    #[test]
    fn single_sample_is_insufficient() {
        let entry = entry_with(&[50.0]);
        assert_eq!(evaluate(&entry, 20.0), Evaluation::Insufficient);
    }

    #[test]
    fn zero_baseline_is_insufficient_not_a_division_error() {
        let entry = entry_with(&[0.0, 10.0]);
        assert_eq!(evaluate(&entry, 20.0), Evaluation::Insufficient);
    }
}
