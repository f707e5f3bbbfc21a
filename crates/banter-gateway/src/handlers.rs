// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the web shell.
//!
//! Handles GET /, POST /chat, DELETE /sessions/{id}, GET /health, GET /metrics.

use std::net::SocketAddr;

use axum::{
    Extension, Json,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use banter_core::{HealthStatus, SessionId};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::server::GatewayState;
use crate::session::{self, Resolved, SESSION_HEADER};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message text.
    pub message: String,
    /// Session token from an earlier reply.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The bot's reply.
    pub reply: String,
    /// Session the message was filed under; send it back to continue.
    pub session_id: String,
    /// Present (and true) when memory could not be read or written.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub memory_degraded: bool,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when both stores are healthy, otherwise "degraded".
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Short-term store health.
    pub short_term: String,
    /// Long-term store health.
    pub long_term: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /chat
///
/// Resolves the session, runs the message through the orchestrator and
/// returns the reply. The session token is echoed in the body and in the
/// `X-Session-Id` header.
pub async fn post_chat(
    State(state): State<GatewayState>,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Response {
    let peer = connect_info.map(|Extension(ConnectInfo(addr))| addr);
    let Some(resolved) = session::resolve(
        state.session_mode,
        body.session_id.as_deref(),
        &headers,
        peer,
    ) else {
        warn!("remote_addr session mode but the peer address is unknown");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "client address unavailable",
        );
    };
    if let Resolved::Issued(id) = &resolved {
        info!(session = %id, "issued session token");
    }
    let session = resolved.session();

    match state.orchestrator.handle(session, &body.message).await {
        Ok(reply) => {
            let mut response = (
                StatusCode::OK,
                Json(ChatResponse {
                    reply: reply.reply,
                    session_id: session.to_string(),
                    memory_degraded: reply.memory_degraded,
                }),
            )
                .into_response();
            if let Ok(value) = HeaderValue::from_str(session.as_str()) {
                response.headers_mut().insert(SESSION_HEADER, value);
            }
            response
        }
        Err(e) => {
            error!(session = %session, error = %e, "failed to handle chat message");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// DELETE /sessions/{id}
///
/// Forgets both the session's last intent and its conversation log.
pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    let session = SessionId::from(id);
    let memory = state.orchestrator.memory();

    let short = memory.clear_short_term(&session).await;
    let long = memory.clear_long_term(Some(&session)).await;

    match short.reason().or(long.reason()) {
        None => {
            info!(session = %session, "session cleared over http");
            StatusCode::NO_CONTENT.into_response()
        }
        Some(reason) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("memory unavailable: {reason}"),
        ),
    }
}

/// GET /health
///
/// Reports store health and uptime. Always 200; `status` says whether
/// memory is fully available.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let health = state.orchestrator.memory().health().await;
    Json(HealthResponse {
        status: if health.is_healthy() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        short_term: describe(&health.short_term),
        long_term: describe(&health.long_term),
    })
}

/// GET /metrics
///
/// Prometheus text exposition, or 404 when no recorder is installed.
pub async fn get_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => error_response(StatusCode::NOT_FOUND, "metrics not enabled"),
    }
}

fn describe(status: &HealthStatus) -> String {
    match status {
        HealthStatus::Healthy => "healthy".to_string(),
        HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
        HealthStatus::Unhealthy(reason) => format!("unhealthy: {reason}"),
    }
}
