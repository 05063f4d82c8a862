use std::sync::Arc;
use std::time::Instant;

use super::MetricsRegistry;
use crate::services::gateway::Upstream;

/// Collector for refresh pipeline metrics
pub struct RefreshMetricsCollector {
    metrics: Arc<MetricsRegistry>,
}

impl RefreshMetricsCollector {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self { metrics }
    }

    pub fn record_success(
        &self,
        created: u64,
        updated: u64,
        skipped: u64,
        total: i64,
        duration_secs: f64,
    ) {
        self.metrics
            .refresh_total
            .with_label_values(&["success"])
            .inc();

        self.metrics.refresh_duration_seconds.observe(duration_secs);

        for (kind, count) in [("new", created), ("updated", updated), ("skipped", skipped)] {
            self.metrics
                .refresh_records_total
                .with_label_values(&[kind])
                .inc_by(count as f64);
        }

        self.metrics.countries_stored.set(total as f64);
    }

    pub fn record_upstream_failure(&self, upstream: Upstream) {
        self.metrics
            .refresh_total
            .with_label_values(&["upstream_failure"])
            .inc();

        self.metrics
            .upstream_failures_total
            .with_label_values(&[upstream.as_str()])
            .inc();
    }

    pub fn record_store_failure(&self) {
        self.metrics
            .refresh_total
            .with_label_values(&["store_failure"])
            .inc();
    }

    pub fn record_render_failure(&self) {
        self.metrics.summary_render_failures_total.inc();
    }
}

/// Timer helper for measuring durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for MetricsTimer {
    fn default() -> Self {
        Self::new()
    }
}
