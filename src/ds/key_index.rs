//! Key → slot lookup for the cache.
//!
//! A thin wrapper over `FxHashMap<K, SlotId>` that keeps the cache's lookup
//! path separate from its frequency bookkeeping. Lookups accept any borrowed
//! form of the key, so a `KeyIndex<String>` can be queried with `&str`.
//!
//! ```
//! use freqcache::ds::{KeyIndex, SlotArena};
//!
//! let mut arena = SlotArena::new();
//! let mut index = KeyIndex::new();
//!
//! let id = arena.insert("payload");
//! index.insert("key".to_string(), id);
//!
//! assert_eq!(index.lookup("key"), Some(id));
//! assert_eq!(index.remove("key"), Some(id));
//! assert!(index.is_empty());
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
pub struct KeyIndex<K> {
    map: FxHashMap<K, SlotId>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Maps `key` to `id`, returning the id it replaced.
    #[inline]
    pub fn insert(&mut self, key: K, id: SlotId) -> Option<SlotId> {
        self.map.insert(key, id)
    }

    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key).copied()
    }

    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.remove(key)
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, SlotId)> {
        self.map.iter().map(|(key, id)| (key, *id))
    }
}

impl<K> Default for KeyIndex<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::slot_arena::SlotArena;

    #[test]
    fn key_index_insert_lookup_remove() {
        let mut arena = SlotArena::new();
        let (a, b) = (arena.insert(()), arena.insert(()));
        let mut index = KeyIndex::new();
        assert_eq!(index.insert("a".to_string(), a), None);
        assert_eq!(index.insert("b".to_string(), b), None);

        assert_eq!(index.lookup("a"), Some(a));
        assert!(index.contains("b"));
        assert!(!index.contains("c"));
        assert_eq!(index.len(), 2);

        assert_eq!(index.remove("a"), Some(a));
        assert_eq!(index.remove("a"), None);
        assert_eq!(index.lookup("a"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn key_index_insert_replaces_slot() {
        let mut arena = SlotArena::new();
        let (first, second) = (arena.insert(()), arena.insert(()));
        let mut index = KeyIndex::with_capacity(4);
        index.insert(1u64, first);
        assert_eq!(index.insert(1u64, second), Some(first));
        assert_eq!(index.lookup(&1), Some(second));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn key_index_iter_and_clear() {
        let mut arena = SlotArena::new();
        let (x, y) = (arena.insert(()), arena.insert(()));
        let mut index = KeyIndex::new();
        index.insert(1u32, x);
        index.insert(2u32, y);

        let mut pairs: Vec<_> = index.iter().map(|(k, id)| (*k, id.index())).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, x.index()), (2, y.index())]);

        index.clear();
        assert!(index.is_empty());
    }
}
