use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Counts HTTP traffic and translated error responses. Everything is
// registered with a dedicated registry and scraped via /metrics.
//
// The error translator itself never touches these; counting happens in the
// HTTP layer around it.
//
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // HTTP traffic
    pub http_requests_total: IntCounterVec,
    pub error_responses_total: IntCounterVec,

    // Domain
    pub sign_ins_total: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests received"),
            &["endpoint"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let error_responses_total = IntCounterVec::new(
            Opts::new(
                "error_responses_total",
                "Total error responses produced by the translator",
            ),
            &["kind", "status"],
        )?;
        registry.register(Box::new(error_responses_total.clone()))?;

        let sign_ins_total =
            IntCounter::new("sign_ins_total", "Total successful user sign-ins")?;
        registry.register(Box::new(sign_ins_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            error_responses_total,
            sign_ins_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

// ============================================================================
// Tests
// ============================================================================
