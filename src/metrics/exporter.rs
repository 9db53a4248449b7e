use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::LfuMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for LFU metrics snapshots.
///
/// Writes the Prometheus text exposition format, so output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; exporting never disturbs the cache.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<LfuMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LfuMetricsSnapshot) {
        self.counter("get_calls_total", snapshot.get_calls);
        self.counter("get_hits_total", snapshot.get_hits);
        self.counter("get_misses_total", snapshot.get_misses);
        self.counter("insert_calls_total", snapshot.insert_calls);
        self.counter("insert_updates_total", snapshot.insert_updates);
        self.counter("insert_new_total", snapshot.insert_new);
        self.counter("evict_calls_total", snapshot.evict_calls);
        self.counter("evicted_entries_total", snapshot.evicted_entries);
        self.counter("pop_lfu_calls_total", snapshot.pop_lfu_calls);
        self.counter("pop_lfu_found_total", snapshot.pop_lfu_found);
        self.counter("peek_lfu_calls_total", snapshot.peek_lfu_calls);
        self.counter("peek_lfu_found_total", snapshot.peek_lfu_found);
        self.counter("frequency_calls_total", snapshot.frequency_calls);
        self.counter("frequency_found_total", snapshot.frequency_found);
        self.gauge("cache_len", snapshot.cache_len as u64);
        self.gauge("capacity", snapshot.capacity as u64);
        self.gauge("bucket_count", snapshot.bucket_count as u64);
        self.gauge("min_freq", snapshot.min_freq);
    }
}
