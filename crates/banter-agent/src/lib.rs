// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for Banter.
//!
//! The [`Orchestrator`] runs one message through the pipeline:
//! - classify the intent and record it as short-term memory
//! - log the user message to long-term memory
//! - extract entities
//! - answer with a fixed reply, or ask the completion API with history
//! - log the reply
//!
//! Both shells (web and terminal) call [`Orchestrator::handle`].

pub mod context;
pub mod route;
pub mod shutdown;

use std::sync::Arc;
use std::time::Instant;

use banter_config::model::{AgentConfig, BanterConfig};
use banter_core::{
    BanterError, CompletionProvider, ConversationTurn, EntityExtractor, Intent, IntentClassifier,
    PluginAdapter, Role, SessionId,
};
use banter_memory::MemoryManager;
use serde::Serialize;
use tracing::{debug, info};

pub use route::Route;

/// What the orchestrator produced for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub intent: Intent,
    pub route: Route,
    /// True when any memory operation for this message failed or timed out.
    pub memory_degraded: bool,
    /// Turns handed to the completion API (fallback route only).
    #[serde(skip)]
    pub history: Vec<ConversationTurn>,
}

/// Runs messages through classification, routing and memory.
///
/// Holds no per-session state; everything carried between messages lives in
/// the [`MemoryManager`].
pub struct Orchestrator {
    classifier: Arc<dyn IntentClassifier>,
    extractor: Arc<dyn EntityExtractor>,
    provider: Arc<dyn CompletionProvider>,
    memory: Arc<MemoryManager>,
    agent: AgentConfig,
    model: String,
    temperature: Option<f32>,
}

impl Orchestrator {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        extractor: Arc<dyn EntityExtractor>,
        provider: Arc<dyn CompletionProvider>,
        memory: Arc<MemoryManager>,
        config: &BanterConfig,
    ) -> Self {
        info!(
            agent_name = config.agent.name.as_str(),
            classifier = classifier.name(),
            extractor = extractor.name(),
            provider = provider.name(),
            "orchestrator initialized"
        );

        Self {
            classifier,
            extractor,
            provider,
            memory,
            agent: config.agent.clone(),
            model: config.openai.model.clone(),
            temperature: config.openai.temperature,
        }
    }

    pub fn memory(&self) -> &Arc<MemoryManager> {
        &self.memory
    }

    /// Handles one user message for `session`.
    ///
    /// Classifier, extractor and completion failures are returned as `Err`.
    /// Memory failures are not; they set [`ChatReply::memory_degraded`].
    pub async fn handle(
        &self,
        session: &SessionId,
        message: &str,
    ) -> Result<ChatReply, BanterError> {
        let classification = self.classifier.classify(message, &Intent::ALL).await?;
        let intent = classification.intent;
        info!(
            session = %session,
            intent = %intent,
            confidence = classification.confidence,
            "intent detected"
        );

        let previous = self.memory.get_short_term(session).await;
        let mut degraded = previous.is_degraded();
        degraded |= self.memory.set_short_term(session, intent).await.is_degraded();

        let stored = self.memory.store_long_term(session, Role::User, message).await;
        degraded |= stored.is_degraded();
        let current_id = stored.into_value();

        let entities = self.extractor.extract(message).await?;
        debug!(session = %session, entities = ?entities, "entities extracted");

        let route = Route::select(intent, &entities);
        let (reply, history) = match route.fixed_reply(&entities) {
            Some(reply) => (reply, Vec::new()),
            None => {
                let previous = previous.into_value();
                self.complete_with_history(
                    session,
                    message,
                    previous,
                    current_id.as_deref(),
                    &mut degraded,
                )
                .await?
            }
        };

        degraded |= self
            .memory
            .store_long_term(session, Role::Assistant, &reply)
            .await
            .is_degraded();

        banter_prometheus::record_message(route.as_str());
        info!(session = %session, route = %route, memory_degraded = degraded, "reply ready");

        Ok(ChatReply {
            reply,
            intent,
            route,
            memory_degraded: degraded,
            history,
        })
    }

    /// The fallback route: one completion call over the session's recent history.
    async fn complete_with_history(
        &self,
        session: &SessionId,
        message: &str,
        previous: Option<Intent>,
        current_id: Option<&str>,
        degraded: &mut bool,
    ) -> Result<(String, Vec<ConversationTurn>), BanterError> {
        let entries = self.memory.retrieve_long_term(Some(session)).await;
        *degraded |= entries.is_degraded();

        let history =
            context::history_turns(entries.value(), current_id, self.agent.history_turns);
        let system = context::system_instruction(&self.agent.system_prompt, previous);
        let request = context::assemble_request(
            system,
            history.clone(),
            message,
            &self.model,
            self.temperature,
        );

        debug!(
            session = %session,
            history_turns = history.len(),
            model = request.model.as_str(),
            "requesting completion"
        );
        let started = Instant::now();
        let response = self.provider.complete(request).await?;
        banter_prometheus::record_completion_latency(started.elapsed().as_secs_f64());

        let reply = response
            .first_choice()
            .map(str::to_string)
            .ok_or_else(|| BanterError::Provider {
                message: "completion response had no choices".into(),
                source: None,
            })?;

        Ok((reply, history))
    }
}
