//! freqcache: a bounded LFU cache with O(1) lookup, insert and eviction.
//!
//! Entries are grouped into frequency buckets; eviction takes the least
//! recently touched entry of the lowest populated frequency. See
//! [`policy::lfu`] for the cache itself and [`ds`] for the bucket structure.
//!
//! ```
//! use freqcache::prelude::*;
//!
//! let mut cache = CacheBuilder::new(2).build::<&str, u32>();
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
