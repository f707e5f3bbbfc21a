// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web shell HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the web shell.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use banter_agent::Orchestrator;
use banter_config::model::{GatewayConfig, SessionMode};
use banter_core::BanterError;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Health state for the health and metrics endpoints.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Optional Prometheus metrics render function.
    pub prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

impl HealthState {
    pub fn new(prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>) -> Self {
        Self {
            start_time: std::time::Instant::now(),
            prometheus_render,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Runs each chat message.
    pub orchestrator: Arc<Orchestrator>,
    /// How callers are mapped to sessions.
    pub session_mode: SessionMode,
    /// Health state for `/health` and `/metrics`.
    pub health: HealthState,
}

/// Builds the application router.
///
/// - GET / (chat page; from `static_dir` when set)
/// - POST /chat
/// - DELETE /sessions/{id}
/// - GET /health
/// - GET /metrics
pub fn router(state: GatewayState, static_dir: Option<&str>) -> Router {
    let api = Router::new()
        .route("/chat", post(handlers::post_chat))
        .route("/sessions/{id}", delete(handlers::delete_session))
        .route("/health", get(handlers::get_health))
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api.route("/", get(handlers::index)),
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves the web shell until `cancel` fires, then finishes in-flight requests.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), BanterError> {
    let app = router(state, config.static_dir.as_deref());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BanterError::Internal(format!("failed to bind web shell to {addr}: {e}")))?;

    tracing::info!("web shell listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        cancel.cancelled().await;
        tracing::info!("web shell shutting down gracefully");
    })
    .await
    .map_err(|e| BanterError::Internal(format!("web shell server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use banter_test_utils::TestHarness;
    use tower::ServiceExt;

    async fn state() -> (TestHarness, GatewayState) {
        let harness = TestHarness::builder().build().await.unwrap();
        let state = GatewayState {
            orchestrator: harness.orchestrator.clone(),
            session_mode: SessionMode::Token,
            health: HealthState::new(None),
        };
        (harness, state)
    }

    #[tokio::test]
    async fn built_in_page_served_at_root() {
        let (_harness, state) = state().await;
        let response = router(state, None)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("<title>Banter</title>"));
    }

    #[tokio::test]
    async fn static_dir_overrides_built_in_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<p>custom page</p>").unwrap();

        let (_harness, state) = state().await;
        let app = router(state, dir.path().to_str());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>custom page</p>");
    }

    #[tokio::test]
    async fn metrics_not_found_without_recorder() {
        let (_harness, state) = state().await;
        let response = router(state, None)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_rendered_when_recorder_present() {
        let (_harness, mut state) = state().await;
        state.health = HealthState::new(Some(Arc::new(|| {
            "banter_messages_total 3\n".to_string()
        })));
        let response = router(state, None)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"banter_messages_total 3\n");
    }
}
