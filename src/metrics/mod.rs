//! Optional counters for the LFU cache (feature `metrics`).
//!
//! Recording, snapshotting and exporting are kept apart: the cache writes
//! through the recorder traits, callers read an [`LfuMetricsSnapshot`], and
//! [`PrometheusTextExporter`] publishes snapshots.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::LfuMetrics;
pub use snapshot::LfuMetricsSnapshot;
pub use traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsExporter,
    MetricsSnapshotProvider,
};
