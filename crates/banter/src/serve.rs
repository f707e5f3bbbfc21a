// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `banter serve` command implementation.
//!
//! Installs the metrics recorder, builds the runtime, and serves the web
//! shell until SIGINT or SIGTERM. The stores are released after the server
//! has drained.

use std::sync::Arc;

use banter_agent::shutdown;
use banter_config::model::BanterConfig;
use banter_core::BanterError;
use banter_gateway::{GatewayState, HealthState};
use banter_prometheus::PrometheusExporter;
use tracing::{info, warn};

use crate::runtime::Runtime;

/// Runs the `banter serve` command.
pub async fn run_serve(config: BanterConfig) -> Result<(), BanterError> {
    info!("starting banter serve");

    let prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>> =
        match PrometheusExporter::install() {
            Ok(exporter) => Some(Arc::new(move || exporter.render())),
            Err(e) => {
                warn!(error = %e, "metrics disabled");
                None
            }
        };

    let runtime = Runtime::build(&config).await?;

    let health = runtime.memory.health().await;
    if !health.is_healthy() {
        warn!(
            short_term = ?health.short_term,
            long_term = ?health.long_term,
            "memory is not fully available; replies will be marked degraded"
        );
    }

    let state = GatewayState {
        orchestrator: runtime.orchestrator.clone(),
        session_mode: config.gateway.session_mode,
        health: HealthState::new(prometheus_render),
    };

    let cancel = shutdown::install_signal_handler();
    let served = banter_gateway::start_server(&config.gateway, state, cancel).await;

    runtime.shutdown().await;
    served
}
