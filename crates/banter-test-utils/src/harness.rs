// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` wires mock NLU and completion adapters into a real
//! [`Orchestrator`] backed by a real [`MemoryManager`]: the in-process
//! short-term store and a SQLite log in a temp directory.

use std::sync::Arc;

use banter_agent::{ChatReply, Orchestrator};
use banter_config::model::{BanterConfig, ShortTermBackend};
use banter_core::{BanterError, SessionId};
use banter_memory::MemoryManager;

use crate::mock_nlu::{MockClassifier, MockExtractor};
use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    config: BanterConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = BanterConfig::default();
        config.agent.system_prompt = "You are a test assistant.".to_string();
        config.memory.short_term.backend = ShortTermBackend::Memory;
        Self {
            responses: Vec::new(),
            config,
        }
    }

    /// Set mock provider replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.config.agent.system_prompt = prompt.to_string();
        self
    }

    /// Set how many history turns reach the completion request.
    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.config.agent.history_turns = turns;
        self
    }

    /// Set the short-term TTL in seconds.
    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.config.memory.short_term.ttl_secs = ttl_secs;
        self
    }

    /// Replace the whole configuration. The memory backends are still forced
    /// to the in-process store and the temp database.
    pub fn with_config(mut self, config: BanterConfig) -> Self {
        self.config = config;
        self.config.memory.short_term.backend = ShortTermBackend::Memory;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, BanterError> {
        let temp_dir = tempfile::TempDir::new().map_err(BanterError::storage)?;
        let mut config = self.config;
        config.memory.long_term.path = temp_dir
            .path()
            .join("memory.db")
            .to_string_lossy()
            .to_string();

        let memory = Arc::new(MemoryManager::from_config(&config.memory).await?);

        let classifier = Arc::new(MockClassifier::new());
        let extractor = Arc::new(MockExtractor::new());
        let provider = Arc::new(if self.responses.is_empty() {
            MockProvider::new()
        } else {
            MockProvider::with_responses(self.responses)
        });

        let orchestrator = Arc::new(Orchestrator::new(
            classifier.clone(),
            extractor.clone(),
            provider.clone(),
            memory.clone(),
            &config,
        ));

        Ok(TestHarness {
            classifier,
            extractor,
            provider,
            memory,
            orchestrator,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock adapters and temp storage.
pub struct TestHarness {
    /// The scripted intent classifier.
    pub classifier: Arc<MockClassifier>,
    /// The scripted entity extractor.
    pub extractor: Arc<MockExtractor>,
    /// The mock completion provider.
    pub provider: Arc<MockProvider>,
    /// Memory over the in-process store and the temp SQLite log.
    pub memory: Arc<MemoryManager>,
    /// The orchestrator under test.
    pub orchestrator: Arc<Orchestrator>,
    /// Configuration the stack was built from.
    pub config: BanterConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send a message through the full pipeline for `session`.
    pub async fn send_message(
        &self,
        session: &str,
        text: &str,
    ) -> Result<ChatReply, BanterError> {
        self.orchestrator
            .handle(&SessionId::from(session), text)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::Intent;

    #[tokio::test]
    async fn harness_builds_and_routes() {
        let harness = TestHarness::builder().build().await.unwrap();
        harness.classifier.push(Intent::Weather).await;

        let reply = harness.send_message("s1", "is it raining?").await.unwrap();
        assert!(reply.reply.starts_with("I can provide weather updates"));
        assert!(!reply.memory_degraded);
        assert_eq!(
            harness
                .memory
                .retrieve_long_term(Some(&SessionId::from("s1")))
                .await
                .value()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn unscripted_message_falls_back_to_mock_reply() {
        let harness = TestHarness::builder()
            .with_mock_responses(vec!["scripted".into()])
            .build()
            .await
            .unwrap();

        let reply = harness.send_message("s1", "what is rust?").await.unwrap();
        assert_eq!(reply.reply, "scripted");
        assert_eq!(harness.provider.requests().await.len(), 1);
    }
}
