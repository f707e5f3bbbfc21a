// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web shell for Banter.
//!
//! An axum server that serves a chat page and a JSON chat endpoint in front
//! of the [`Orchestrator`](banter_agent::Orchestrator). Callers are
//! identified by an issued session token (default) or by their IP address.

pub mod handlers;
pub mod server;
pub mod session;

pub use server::{GatewayState, HealthState, router, start_server};
pub use session::SESSION_HEADER;
