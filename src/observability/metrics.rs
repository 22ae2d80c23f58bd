//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define race metrics (probe outcomes, race results, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `site_race_probes_total` (counter): probe outcomes by `outcome`
//! - `site_race_races_total` (counter): races by `result`
//! - `site_race_race_duration_seconds` (histogram): time to resolution
//! - `site_race_requests_total` (counter): API requests by route, status
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests need no setup
//! - Per-site failures are visible here and in logs, never in API responses

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::search::types::{ProbeOutcome, RaceResult};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_probe(outcome: &ProbeOutcome) {
    ::metrics::counter!("site_race_probes_total", "outcome" => outcome.label()).increment(1);
}

pub fn record_race(result: &RaceResult, start_time: Instant) {
    ::metrics::counter!("site_race_races_total", "result" => result.label()).increment(1);
    ::metrics::histogram!("site_race_race_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

pub fn record_request(route: &'static str, status: u16) {
    ::metrics::counter!(
        "site_race_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}
