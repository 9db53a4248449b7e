use std::sync::atomic::{AtomicU64, Ordering};

/// Counter that can be bumped from `&self` methods such as `peek_lfu`.
///
/// `&LfuCache` may be shared across threads, so increments are atomic.
/// Counters are observational only; `Relaxed` ordering is enough.
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
