//! Prometheus metrics for the multi-chain orchestration layer.
//!
//! All metrics follow the naming convention: `c3_multichain_<metric>_<unit>`
//!
//! Metrics are process-global and always updated; [`register_metrics`] only
//! makes them visible to [`encode_metrics`].

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter,
    IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Partition dispatches by chain, operation and outcome
    pub static ref PARTITION_DISPATCHES: CounterVec = CounterVec::new(
        Opts::new(
            "c3_multichain_partition_dispatches_total",
            "Per-chain partitions handed to adapters"
        ),
        &["chain", "operation", "outcome"]  // operation: send/status/block, outcome: ok/error
    ).expect("metric creation failed");

    /// Transfers handed to adapters, by chain
    pub static ref TRANSFERS_SUBMITTED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "c3_multichain_transfers_submitted_total",
            "Transfer requests submitted to chain adapters"
        ),
        &["chain"]
    ).expect("metric creation failed");

    /// Status lookups handed to adapters, by chain
    pub static ref STATUS_QUERIES: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "c3_multichain_status_queries_total",
            "Transaction status lookups submitted to chain adapters"
        ),
        &["chain"]
    ).expect("metric creation failed");

    /// Confirmation poller rounds
    pub static ref POLL_ROUNDS: IntCounter = IntCounter::new(
        "c3_multichain_poll_rounds_total",
        "Status rounds executed by the confirmation poller"
    ).expect("metric creation failed");

    /// Whole-batch dispatch latency
    pub static ref DISPATCH_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "c3_multichain_dispatch_duration_seconds",
            "Time from batch entry to reassembled result"
        ).buckets(exponential_buckets(0.001, 2.0, 16).expect("valid bucket layout")),
        &["operation"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless; already registered collectors
/// are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PARTITION_DISPATCHES.clone()),
        Box::new(TRANSFERS_SUBMITTED.clone()),
        Box::new(STATUS_QUERIES.clone()),
        Box::new(POLL_ROUNDS.clone()),
        Box::new(DISPATCH_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one operation of [`DISPATCH_DURATION`].
    pub fn dispatch(operation: &str) -> Self {
        Self::new(&DISPATCH_DURATION.with_label_values(&[operation]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
