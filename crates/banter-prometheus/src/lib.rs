// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics for the Banter chatbot.
//!
//! Uses the metrics-rs facade with the Prometheus exporter. Metrics are
//! rendered as Prometheus text format via [`PrometheusExporter::render`],
//! which the web shell exposes at `/metrics`.

pub mod recording;

use banter_core::BanterError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub use recording::{
    record_completion_latency, record_memory_degraded, record_memory_latency, record_message,
    register_metrics,
};

/// Owns the handle of the process-wide Prometheus recorder.
#[derive(Clone)]
pub struct PrometheusExporter {
    handle: PrometheusHandle,
}

impl PrometheusExporter {
    /// Installs the Prometheus recorder globally.
    ///
    /// Only one recorder can be installed per process; a second call fails.
    pub fn install() -> Result<Self, BanterError> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            BanterError::Internal(format!("failed to install Prometheus recorder: {e}"))
        })?;

        register_metrics();
        tracing::info!("prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Wraps an existing handle (a recorder installed elsewhere).
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Render all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_record_into_local_recorder() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let exporter = PrometheusExporter::from_handle(recorder.handle());

        metrics::with_local_recorder(&recorder, || {
            record_message("fallback");
            record_memory_degraded("get_short_term");
            record_memory_latency("store_long_term", 0.004);
        });

        let text = exporter.render();
        assert!(text.contains("banter_messages_total{route=\"fallback\"} 1"), "{text}");
        assert!(text.contains("banter_memory_degraded_total{op=\"get_short_term\"} 1"), "{text}");
        assert!(text.contains("banter_memory_op_seconds"), "{text}");
    }
}
