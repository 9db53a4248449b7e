//! Eviction policies.

pub mod lfu;
