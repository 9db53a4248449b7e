//! # Cache Traits
//!
//! Trait seams for the cache so callers can stay generic over the concrete
//! implementation.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert / get / contains / len          │
//!   │  is_empty / capacity / clear            │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove / remove_batch                  │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LfuCacheTrait<K, V>            │
//!   │  pop_lfu / peek_lfu / frequency / evict │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `get` takes `&mut self` everywhere: a read in an LFU cache bumps the
//! entry's access count and moves it between buckets.
//!
//! These traits describe single-owner caches. [`ConcurrentCache`] marks types
//! that are safe to share between threads as-is.

/// Core operations every cache supports.
///
/// # Example
///
/// ```
/// use freqcache::traits::CoreCache;
/// use freqcache::policy::lfu::LfuCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// When the key is new and the cache is full, one entry is evicted first
    /// according to the cache's policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key, recording the access.
    ///
    /// Use [`contains`](Self::contains) to test membership without affecting
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache holds.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use freqcache::traits::{CoreCache, MutableCache};
/// use freqcache::policy::lfu::LfuCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LfuCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every key in `keys`; results are in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LFU-specific operations.
///
/// # Example
///
/// ```
/// use freqcache::traits::{CoreCache, LfuCacheTrait};
/// use freqcache::policy::lfu::LfuCache;
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// cache.get(&1);
/// cache.get(&1);
/// assert_eq!(LfuCacheTrait::frequency(&cache, &1), Some(3));
///
/// // 2 and 3 tie at freq=1; 2 was touched least recently.
/// assert_eq!(cache.pop_lfu(), Some((2, "second")));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least frequently used entry.
    ///
    /// Ties at the lowest frequency go to the least recently touched entry.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// The entry [`pop_lfu`](Self::pop_lfu) would remove, without removing it
    /// or counting an access.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count for `key`, or `None` if absent.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Removes up to `n` entries, coldest first, and returns how many went.
    ///
    /// The default pops one entry at a time.
    fn evict(&mut self, n: usize) -> usize {
        let mut evicted = 0;
        while evicted < n && self.pop_lfu().is_some() {
            evicted += 1;
        }
        evicted
    }
}

/// Marker for cache types that are safe to share between threads directly.
pub trait ConcurrentCache: Send + Sync {}
