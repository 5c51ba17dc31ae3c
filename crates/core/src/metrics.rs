//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Media host search calls
//! - Badge metadata enrichment

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gallery_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gallery_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

/// Resources returned per search page.
pub static SEARCH_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "gallery_search_results",
            "Number of resources returned per search page",
        )
        .buckets(vec![0.0, 1.0, 6.0, 12.0, 24.0, 50.0, 100.0]),
    )
    .unwrap()
});

// =============================================================================
// Enrichment Metrics
// =============================================================================

/// Metadata lookups by result.
pub static METADATA_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gallery_metadata_lookups_total",
            "Total badge metadata lookups",
        ),
        &["result"], // "hit", "miss", "skipped"
    )
    .unwrap()
});

/// Rows in the badge table once read; 0 if the sheet could not be read.
pub static METADATA_TABLE_ROWS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "gallery_metadata_table_rows",
        "Rows loaded from the badge metadata sheet",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        Box::new(METADATA_LOOKUPS.clone()),
        Box::new(METADATA_TABLE_ROWS.clone()),
    ]
}
