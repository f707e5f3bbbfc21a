// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured replies
//! and records every request it receives, so tests can assert on the
//! assembled prompt.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use banter_core::{
    AdapterType, BanterError, CompletionProvider, CompletionRequest, CompletionResponse,
    HealthStatus, PluginAdapter,
};

/// A mock completion provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::default(),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn push_response(&self, text: &str) {
        self.responses.lock().await.push_back(Ok(text.to_string()));
    }

    /// Make the next call fail with a provider error.
    pub async fn fail_next(&self, message: &str) {
        self.responses
            .lock()
            .await
            .push_back(Err(message.to_string()));
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BanterError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        let next = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()));

        match next {
            Ok(text) => Ok(CompletionResponse {
                choices: vec![text],
                model,
            }),
            Err(message) => Err(BanterError::Provider {
                message,
                source: None,
            }),
        }
    }
}
