//! # LFU (Least Frequently Used) Cache
//!
//! A bounded key-value cache that, when full, evicts the entry with the fewest
//! recorded accesses. Ties at the lowest access count go to the entry that was
//! touched least recently.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   ┌───────────────────────────┐      ┌────────────────────────────────┐  │
//!   │   │ index: KeyIndex<K>        │      │ buckets: FrequencyBuckets<     │  │
//!   │   │                           │      │            Entry<K, V>>        │  │
//!   │   │   "a" ──► id_0 ───────────┼──────┼─► id_0  freq=2  {a, 1}         │  │
//!   │   │   "c" ──► id_2 ───────────┼──────┼─► id_2  freq=1  {c, 3}         │  │
//!   │   └───────────────────────────┘      │                                │  │
//!   │                                      │  min_freq=1                    │  │
//!   │   capacity: usize                    │  freq=1: [id_2]       ◄─ tail  │  │
//!   │                                      │  freq=2: [id_0]                │  │
//!   │                                      └────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys and values live inside the bucket nodes; the key index only maps a key
//! to its node's [`SlotId`](crate::ds::SlotId).
//!
//! ## Operations
//!
//! | Method           | Time  | Notes                                            |
//! |------------------|-------|--------------------------------------------------|
//! | `insert(k, v)`   | O(1)  | New key: evict one if full, start at freq=1      |
//! |                  |       | Existing key: replace value, freq += 1           |
//! | `get(&k)`        | O(1)  | Hit promotes the entry (freq += 1)               |
//! | `evict(n)`       | O(n)  | Removes `min(n, len)` entries, coldest first     |
//! | `len()`          | O(1)  |                                                  |
//! | `peek(&k)`       | O(1)  | No promotion                                     |
//! | `pop_lfu()`      | O(1)  | Removes the current eviction candidate           |
//! | `remove(&k)`     | O(1)  |                                                  |
//!
//! ## Eviction Order
//!
//! ```text
//!   capacity = 3
//!
//!   insert a, b, c           freq=1: [c, b, a]
//!   insert d  → evicts a     freq=1: [d, c, b]
//!   get b, b, c, d, d        freq=2: [c]   freq=3: [d, b]
//!   insert e  → evicts c     freq=1: [e]   freq=3: [d, b]
//! ```
//!
//! ## Zero Capacity
//!
//! `LfuCache::new(0)` builds an inert cache: inserts are dropped, `get` always
//! misses and `len` stays 0.
//!
//! ## Thread Safety
//!
//! `LfuCache` is a plain single-owner structure. [`ConcurrentLfuCache`]
//! (feature `concurrency`) wraps one in a `parking_lot::Mutex`. Every call,
//! `get` included, takes the lock exclusively because reads reorder buckets.
//!
//! ## Example
//!
//! ```
//! use freqcache::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("a".to_string(), 1);
//! cache.insert("b".to_string(), 2);
//!
//! assert_eq!(cache.get("a"), Some(&1)); // "a" now at freq=2
//! cache.insert("c".to_string(), 3);     // evicts "b", alone at freq=1
//!
//! assert!(!cache.contains("b"));
//! assert_eq!(cache.len(), 2);
//! ```

use std::borrow::Borrow;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::ds::{FrequencyBuckets, KeyIndex};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Upper bound on storage reserved up front; larger caches grow on demand.
const MAX_PREALLOC: usize = 1 << 16;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Bounded LFU cache with recency tie-breaking.
///
/// See the [module documentation](self) for the eviction rules.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    buckets: FrequencyBuckets<Entry<K, V>>,
    index: KeyIndex<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 creates a cache that accepts no items.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            debug!("lfu cache created with zero capacity; inserts will be dropped");
        }
        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            buckets: FrequencyBuckets::with_capacity(prealloc),
            index: KeyIndex::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is cached. Does not count as an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains(key)
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// For an existing key the value is swapped in place, the entry is
    /// promoted one frequency level, and the old value is returned. For a new
    /// key at capacity, the coldest entry is evicted first and the new entry
    /// starts at frequency 1. A zero-capacity cache drops the value.
    ///
    /// # Example
    ///
    /// ```
    /// use freqcache::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// assert_eq!(cache.insert("k", 1), None);
    /// assert_eq!(cache.insert("k", 2), Some(1));
    /// assert_eq!(cache.frequency(&"k"), Some(2));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        if let Some(id) = self.index.lookup(&key) {
            let previous = self
                .buckets
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.buckets.touch(id);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            return previous;
        }

        if self.len() >= self.capacity {
            self.evict_for_insert();
        }

        let id = self.buckets.insert(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        None
    }

    /// Looks up `key`, promoting it on a hit.
    ///
    /// `None` means not found; the cache is left untouched in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use freqcache::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.insert("page".to_string(), 10);
    ///
    /// assert_eq!(cache.get("page"), Some(&10));
    /// assert_eq!(cache.frequency("page"), Some(2));
    /// assert_eq!(cache.get("missing"), None);
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(id) = self.index.lookup(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        self.buckets.touch(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.buckets.get(id).map(|entry| &entry.value)
    }

    /// Looks up `key` without counting an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.buckets.get(id).map(|entry| &entry.value)
    }

    /// Access count for `key`: 1 after insertion, +1 per `get` or re-insert.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_call();

        let freq = self
            .index
            .lookup(key)
            .and_then(|id| self.buckets.frequency(id));

        #[cfg(feature = "metrics")]
        if freq.is_some() {
            (&self.metrics).record_frequency_found();
        }

        freq
    }

    /// Lowest access count among live entries.
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.min_freq()
    }

    /// Removes up to `n` entries, coldest first, and returns how many were
    /// removed.
    ///
    /// Entries leave in ascending frequency order, least recently touched
    /// first within a frequency. `n == 0` does nothing; `n` past the current
    /// size empties the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use freqcache::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// cache.insert(3, "three");
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.evict(2), 2); // 2 then 3
    /// assert!(cache.contains(&1));
    /// assert_eq!(cache.evict(10), 1);
    /// assert!(cache.is_empty());
    /// ```
    pub fn evict(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let mut evicted = 0;
        while evicted < n {
            let Some((entry, _)) = self.buckets.pop_min() else {
                break;
            };
            self.index.remove(&entry.key);
            evicted += 1;

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        debug!(
            requested = n,
            evicted,
            remaining = self.len(),
            "lfu bulk eviction"
        );
        evicted
    }

    /// [`evict`](Self::evict) for signed counts: `n <= 0` is a no-op.
    pub fn evict_signed(&mut self, n: i64) -> usize {
        match usize::try_from(n) {
            Ok(n) => self.evict(n),
            Err(_) => 0,
        }
    }

    /// Removes and returns the current eviction candidate.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let (entry, _) = self.buckets.pop_min()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_found();

        Some((entry.key, entry.value))
    }

    /// The entry [`pop_lfu`](Self::pop_lfu) would remove, left in place.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_call();

        let (_, entry, _) = self.buckets.peek_min()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_found();

        Some((&entry.key, &entry.value))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.buckets.remove(id).map(|(entry, _)| entry.value)
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.index.clear();

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Cross-checks the key index against the frequency buckets.
    ///
    /// O(n); intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.check_invariants()?;

        if self.index.len() != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, buckets hold {} entries",
                self.index.len(),
                self.buckets.len()
            )));
        }
        if self.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len(),
                self.capacity
            )));
        }
        for (key, id) in self.index.iter() {
            match self.buckets.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {:?} holds a different key than the index",
                        id
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at vacant slot {:?}",
                        id
                    )));
                },
            }
        }
        Ok(())
    }

    fn evict_for_insert(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some((entry, freq)) = self.buckets.pop_min() {
            self.index.remove(&entry.key);
            trace!(freq, len = self.len(), "lfu evicted coldest entry");

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            cache_len: self.len(),
            capacity: self.capacity,
            bucket_count: self.buckets.bucket_count(),
            min_freq: self.buckets.min_freq().unwrap_or(0),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LfuCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        LfuCache::pop_lfu(self)
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }

    fn evict(&mut self, n: usize) -> usize {
        LfuCache::evict(self, n)
    }
}

/// Thread-safe LFU cache: one [`LfuCache`] behind one mutex.
///
/// Every operation holds the lock for its whole duration, so callers never
/// observe a half-promoted entry. Values are stored as `Arc<V>` and handed
/// out as clones of the `Arc`, so nothing borrowed escapes the lock.
/// Cloning the handle shares the same cache.
///
/// # Example
///
/// ```
/// use std::thread;
/// use freqcache::policy::lfu::ConcurrentLfuCache;
///
/// let cache: ConcurrentLfuCache<String, u64> = ConcurrentLfuCache::new(128);
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             for i in 0..16u64 {
///                 let key = format!("{}-{}", t, i);
///                 cache.insert(key.clone(), i);
///                 assert_eq!(cache.get(&key).as_deref(), Some(&i));
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(cache.len(), 64);
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLfuCache<K, V> {
    inner: Arc<Mutex<LfuCache<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLfuCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> std::fmt::Debug for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLfuCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LfuCache::new(capacity))
    }

    /// Wraps an existing cache, keeping its contents.
    pub fn from_cache(cache: LfuCache<K, Arc<V>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Inserts a value, wrapping it in `Arc<V>`. Returns the replaced value.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        self.inner.lock().insert(key, value)
    }

    /// Inserts an already shared value without re-wrapping it.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.lock().insert(key, value)
    }

    /// Looks up `key`, promoting it on a hit.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Looks up `key` without counting an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().frequency(key)
    }

    /// Removes up to `n` entries, coldest first. See [`LfuCache::evict`].
    pub fn evict(&self, n: usize) -> usize {
        self.inner.lock().evict(n)
    }

    /// Signed-count variant of [`evict`](Self::evict); `n <= 0` is a no-op.
    pub fn evict_signed(&self, n: i64) -> usize {
        self.inner.lock().evict_signed(n)
    }

    pub fn pop_lfu(&self) -> Option<(K, Arc<V>)> {
        self.inner.lock().pop_lfu()
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with the lock held, for multi-step updates that must not
    /// interleave with other callers.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use freqcache::policy::lfu::ConcurrentLfuCache;
    ///
    /// let cache: ConcurrentLfuCache<&str, u32> = ConcurrentLfuCache::new(4);
    /// let inserted = cache.with_lock(|inner| {
    ///     if inner.contains("k") {
    ///         false
    ///     } else {
    ///         inner.insert("k", Arc::new(1));
    ///         true
    ///     }
    /// });
    /// assert!(inserted);
    /// ```
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LfuCache<K, Arc<V>>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
}
