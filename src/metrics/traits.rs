//! # Metrics Traits
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │  get hit/miss, insert, evict
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │     LfuMetricsRecorder      │   │   LfuMetricsReadRecorder    │
//!   │  pop_lfu / peek / frequency │   │  &self paths (MetricsCell)  │
//!   └─────────────────────────────┘   └─────────────────────────────┘
//!
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>  │   │    MetricsExporter<S>       │
//!   │ (tests, benches)            │   │ (production monitoring)     │
//!   └─────────────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! Recorders only write counters, providers only read them, exporters only
//! publish snapshots.

/// Counters shared by any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LFU-specific counters.
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
}

/// LFU counters bumped from `&self` methods (interior mutability).
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
