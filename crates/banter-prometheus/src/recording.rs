// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder every call is a no-op.

use metrics::{describe_counter, describe_histogram};

/// Register all Banter metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!("banter_messages_total", "Messages handled, by route");
    describe_counter!(
        "banter_memory_degraded_total",
        "Memory operations that fell back to a degraded result"
    );
    describe_histogram!(
        "banter_memory_op_seconds",
        "Latency of memory store operations in seconds"
    );
    describe_histogram!(
        "banter_completion_latency_seconds",
        "Completion API latency in seconds"
    );
}

/// Record a handled message and the route that answered it.
pub fn record_message(route: &str) {
    metrics::counter!("banter_messages_total", "route" => route.to_string()).increment(1);
}

/// Record a memory operation that degraded.
pub fn record_memory_degraded(op: &'static str) {
    metrics::counter!("banter_memory_degraded_total", "op" => op).increment(1);
}

/// Record how long a memory store operation took.
pub fn record_memory_latency(op: &'static str, seconds: f64) {
    metrics::histogram!("banter_memory_op_seconds", "op" => op).record(seconds);
}

/// Record completion API latency.
pub fn record_completion_latency(seconds: f64) {
    metrics::histogram!("banter_completion_latency_seconds").record(seconds);
}
