//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by route and outcome
//! - `router_view_loads_total` (counter): lazy view loads by route and result
//! - `router_view_load_duration_seconds` (histogram): lazy load latency

use std::time::Instant;

/// Record a finished navigation attempt.
pub fn record_navigation(route: &str, outcome: &'static str) {
    metrics::counter!(
        "router_navigations_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a lazy view load and its latency.
pub fn record_view_load(route: &str, success: bool, started: Instant) {
    let result = if success { "ok" } else { "error" };
    metrics::counter!(
        "router_view_loads_total",
        "route" => route.to_string(),
        "result" => result
    )
    .increment(1);
    metrics::histogram!(
        "router_view_load_duration_seconds",
        "route" => route.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}
