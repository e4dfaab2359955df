//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by method, status
//! - `router_request_duration_seconds` (histogram): dispatch latency by method
//! - `router_routes_registered` (gauge): registered endpoints at startup

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a dispatched request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("router_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of the frozen route table.
pub fn record_routes(count: usize) {
    metrics::gauge!("router_routes_registered").set(count as f64);
}
