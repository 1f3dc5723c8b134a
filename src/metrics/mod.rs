//! Prometheus metrics registry

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

/// Service-wide metrics, exported at `/metrics`.
pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub analyses_total: IntCounter,
    pub analysis_failures_total: IntCounter,
    pub batch_runs_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests received")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let analyses_total =
            IntCounter::new("analyses_total", "Symbol analyses performed")?;
        let analysis_failures_total =
            IntCounter::new("analysis_failures_total", "Symbol analyses that failed")?;
        let batch_runs_total = IntCounter::new("batch_runs_total", "Batch analysis runs")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(analyses_total.clone()))?;
        registry.register(Box::new(analysis_failures_total.clone()))?;
        registry.register(Box::new(batch_runs_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            analyses_total,
            analysis_failures_total,
            batch_runs_total,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics encoding: {}", e)))
    }
}
