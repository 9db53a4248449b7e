//! Building blocks for the LFU cache: the entry arena, the frequency-bucket
//! index and the key index.

pub mod frequency_buckets;
pub mod key_index;
pub mod slot_arena;

pub use frequency_buckets::{BucketIds, DEFAULT_BUCKET_PREALLOC, Frequencies, FrequencyBuckets};
pub use key_index::KeyIndex;
pub use slot_arena::{SlotArena, SlotId};
