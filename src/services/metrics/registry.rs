use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

const NAMESPACE: &str = "countries";

/// Central metrics registry for the country mirror
pub struct MetricsRegistry {
    registry: Registry,

    // HTTP Metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,

    // Refresh Metrics
    pub refresh_total: CounterVec,
    pub refresh_duration_seconds: Histogram,
    pub upstream_failures_total: CounterVec,
    pub refresh_records_total: CounterVec,
    pub countries_stored: Gauge,
    pub summary_render_failures_total: Counter,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        // HTTP Metrics
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests").namespace(NAMESPACE),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request duration")
                .namespace(NAMESPACE)
                .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // Refresh Metrics
        let refresh_total = CounterVec::new(
            Opts::new("refresh_total", "Refresh runs by outcome").namespace(NAMESPACE),
            &["outcome"],
        )?;
        registry.register(Box::new(refresh_total.clone()))?;

        let refresh_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("refresh_duration_seconds", "Fetch and reconcile duration")
                .namespace(NAMESPACE)
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0]),
        )?;
        registry.register(Box::new(refresh_duration_seconds.clone()))?;

        let upstream_failures_total = CounterVec::new(
            Opts::new("upstream_failures_total", "Failed upstream fetches").namespace(NAMESPACE),
            &["upstream"],
        )?;
        registry.register(Box::new(upstream_failures_total.clone()))?;

        let refresh_records_total = CounterVec::new(
            Opts::new("refresh_records_total", "Catalog entries processed by refreshes")
                .namespace(NAMESPACE),
            &["kind"],
        )?;
        registry.register(Box::new(refresh_records_total.clone()))?;

        let countries_stored = Gauge::with_opts(
            Opts::new("stored", "Countries in the store after the last refresh").namespace(NAMESPACE),
        )?;
        registry.register(Box::new(countries_stored.clone()))?;

        let summary_render_failures_total = Counter::with_opts(
            Opts::new("summary_render_failures_total", "Summary image renders that failed")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(summary_render_failures_total.clone()))?;

        Ok(Arc::new(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            refresh_total,
            refresh_duration_seconds,
            upstream_failures_total,
            refresh_records_total,
            countries_stored,
            summary_render_failures_total,
        }))
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
