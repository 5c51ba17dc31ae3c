//! Prometheus registry for the gallery server.
//!
//! Holds the HTTP request metrics recorded by
//! [`metrics_middleware`](crate::api::middleware::metrics_middleware) and
//! registers the core metrics (media host calls, metadata enrichment) next
//! to them, so one scrape of `/metrics` covers the whole process.

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use tracing::{error, warn};

/// Label for requests that no API route matched (front-end assets).
pub const STATIC_ROUTE: &str = "{static}";

/// Process-wide registry served at `/metrics`.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_all(&registry);
    registry
});

/// Latency per route. Buckets stretch to 10s since `/api/images` waits on
/// the media host.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gallery_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.005, 0.025, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "route", "status"],
    )
    .unwrap()
});

pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gallery_http_requests_total", "Total HTTP requests"),
        &["method", "route", "status"],
    )
    .unwrap()
});

pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "gallery_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

fn register_all(registry: &Registry) {
    let http: [Box<dyn prometheus::core::Collector>; 3] = [
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
    ];

    for metric in http.into_iter().chain(gallery_core::metrics::all_metrics()) {
        if let Err(e) = registry.register(metric) {
            warn!(error = %e, "Failed to register metric");
        }
    }
}

/// Route label for a request: the matched route template, or
/// [`STATIC_ROUTE`] for anything served by the front-end fallback.
pub fn route_label(matched: Option<&str>) -> &str {
    matched.unwrap_or(STATIC_ROUTE)
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
