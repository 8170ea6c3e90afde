//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mapper_requests_total` (counter): served requests by status
//! - `mapper_request_duration_seconds` (histogram): end-to-end latency
//! - `mapper_rules_applied_total` (counter): rule executions by rule name
//! - `mapper_services_resolved_total` (counter): requests that ran address resolution

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("mapper_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("mapper_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_rule_applied(rule: &'static str) {
    metrics::counter!("mapper_rules_applied_total", "rule" => rule).increment(1);
}

pub fn record_resolution() {
    metrics::counter!("mapper_services_resolved_total").increment(1);
}
