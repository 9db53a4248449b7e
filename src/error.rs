//! Error types for freqcache.
//!
//! The cache has no runtime failure modes: bad capacities and eviction counts
//! are clamped, and a missing key is an `Option::None`. The one error type is
//! [`InvariantError`], produced by the `check_invariants` methods when the
//! internal structure is inconsistent.
//!
//! ```
//! use freqcache::policy::lfu::LfuCache;
//!
//! let mut cache: LfuCache<String, u32> = LfuCache::new(4);
//! cache.insert("a".to_string(), 1);
//! cache.get("a");
//! assert!(cache.check_invariants().is_ok());
//! ```

use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
