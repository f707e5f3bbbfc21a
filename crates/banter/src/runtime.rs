// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide client handles.
//!
//! Every external client (completion API, inference endpoint, Redis, SQLite)
//! is created once here, shared by `Arc`, and released by
//! [`Runtime::shutdown`].

use std::sync::Arc;

use banter_agent::Orchestrator;
use banter_config::model::BanterConfig;
use banter_core::{BanterError, CompletionProvider};
use banter_memory::MemoryManager;
use banter_openai::OpenAiProvider;
use tracing::{info, warn};

/// The assembled chatbot stack.
pub struct Runtime {
    pub memory: Arc<MemoryManager>,
    pub orchestrator: Arc<Orchestrator>,
}

impl Runtime {
    /// Builds every collaborator from config.
    ///
    /// Fails when the completion API key is missing, before any store is opened.
    pub async fn build(config: &BanterConfig) -> Result<Self, BanterError> {
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiProvider::new(&config.openai)?);
        let classifier = banter_nlu::build_classifier(&config.nlu)?;
        let extractor = banter_nlu::build_extractor(&config.nlu)?;
        let memory = Arc::new(MemoryManager::from_config(&config.memory).await?);

        let orchestrator = Arc::new(Orchestrator::new(
            classifier,
            extractor,
            provider,
            memory.clone(),
            config,
        ));

        info!("runtime ready");
        Ok(Self {
            memory,
            orchestrator,
        })
    }

    /// Releases the stores. Errors are logged; shutdown always completes.
    pub async fn shutdown(self) {
        if let Err(e) = self.memory.shutdown().await {
            warn!(error = %e, "memory shutdown reported an error");
        }
        info!("runtime shut down");
    }
}
