// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider adapter trait for hosted LLM APIs.

use async_trait::async_trait;

use crate::error::BanterError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a hosted chat-completion API.
///
/// One request yields a ranked list of candidate completions; callers use
/// the first.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, BanterError>;
}
