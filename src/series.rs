//! # Bounded Series
//! Fixed-capacity, append-only sequence with FIFO eviction.
//!
//! Keeps the rolling window of observed prices from growing without bound.
//! The container is deliberately independent of the persistence format:
//! callers serialize `values()` as a plain ordered list and rebuild with
//! `from_values`, re-applying whatever capacity is configured at load time.

use std::collections::VecDeque;

/// Append-only sequence of samples that evicts the oldest entry once full.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedSeries {
    buf: VecDeque<f64>,
    cap: usize,
}

impl BoundedSeries {
    /// Create an empty series holding at most `cap` samples (minimum 1).
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            buf: VecDeque::with_capacity(cap.min(256)),
            cap,
        }
    }

    /// Rebuild a series from already-ordered values, keeping only the most
    /// recent `cap` of them.
    pub fn from_values(cap: usize, values: Vec<f64>) -> Self {
        let mut series = Self::new(cap);
        for v in values {
            series.push(v);
        }
        series
    }

    /// Append a sample; the oldest sample is dropped once the cap is reached.
    pub fn push(&mut self, value: f64) {
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Most recent sample, if any.
    pub fn last(&self) -> Option<f64> {
        self.buf.back().copied()
    }

    /// Oldest-to-newest iteration.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.buf.iter().copied()
    }

    /// Oldest-to-newest snapshot, suitable for serialization.
    pub fn values(&self) -> Vec<f64> {
        self.buf.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_once_full() {
        let mut s = BoundedSeries::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            s.push(v);
        }
        assert_eq!(s.len(), 3);
        assert_eq!(s.values(), vec![2.0, 3.0, 4.0]);
        assert_eq!(s.last(), Some(4.0));
    }

    #[test]
    fn from_values_applies_cap_keeping_newest() {
        let s = BoundedSeries::from_values(2, vec![10.0, 20.0, 30.0]);
        assert_eq!(s.values(), vec![20.0, 30.0]);
    }

    #[test]
    fn zero_cap_is_clamped() {
        let mut s = BoundedSeries::new(0);
        s.push(5.0);
        assert_eq!(s.len(), 1);
        assert_eq!(s.capacity(), 1);
    }
}
