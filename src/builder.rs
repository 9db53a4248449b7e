//! Cache construction with capacity normalization.
//!
//! Callers that carry capacities as signed integers go through
//! [`CacheBuilder::from_signed`], which maps anything below zero to an inert
//! zero-capacity cache instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use freqcache::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! let inert = CacheBuilder::from_signed(-5).build::<u64, String>();
//! assert_eq!(inert.capacity(), 0);
//! ```

use std::hash::Hash;

#[cfg(feature = "concurrency")]
use crate::policy::lfu::ConcurrentLfuCache;
use crate::policy::lfu::LfuCache;

/// Builder for LFU cache instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builder from a signed capacity; negative values become 0.
    pub fn from_signed(capacity: i64) -> Self {
        Self {
            capacity: usize::try_from(capacity.max(0)).unwrap_or(usize::MAX),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a single-owner cache.
    ///
    /// # Type Parameters
    ///
    /// - `K`: Key type, must be `Eq + Hash + Clone`
    /// - `V`: any value type
    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LfuCache::new(self.capacity)
    }

    /// Build a cache that can be shared between threads.
    ///
    /// ```rust
    /// use freqcache::builder::CacheBuilder;
    ///
    /// let cache = CacheBuilder::new(8).build_concurrent::<&str, Vec<u8>>();
    /// cache.insert("blob", vec![1, 2, 3]);
    /// assert_eq!(cache.get("blob").map(|v| v.len()), Some(3));
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> ConcurrentLfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        ConcurrentLfuCache::new(self.capacity)
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new(16)
    }
}
