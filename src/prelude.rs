pub use crate::builder::CacheBuilder;
pub use crate::ds::{FrequencyBuckets, KeyIndex, SlotArena, SlotId};
pub use crate::error::InvariantError;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::lfu::ConcurrentLfuCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};
