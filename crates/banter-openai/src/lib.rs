// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion provider for the Banter chatbot.
//!
//! This crate implements [`CompletionProvider`] for the chat completions API.
//! Any server speaking the same wire format (local gateways, proxies) works
//! by pointing `openai.base_url` at it.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use banter_config::model::OpenAiConfig;
use banter_core::{
    AdapterType, BanterError, CompletionProvider, CompletionRequest, CompletionResponse,
    HealthStatus, PluginAdapter,
};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest};

/// Environment variable consulted when `openai.api_key` is unset.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Completion provider backed by the chat completions endpoint.
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from the `[openai]` config section.
    pub fn new(config: &OpenAiConfig) -> Result<Self, BanterError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(model = %config.model, endpoint = %client.endpoint(), "completion provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

fn to_chat_request(request: &CompletionRequest) -> ChatRequest {
    ChatRequest {
        model: request.model.clone(),
        messages: request
            .messages
            .iter()
            .map(|turn| ChatMessage {
                role: turn.role.to_string(),
                content: turn.content.clone(),
            })
            .collect(),
        temperature: request.temperature,
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        // Probing would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        debug!("completion provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BanterError> {
        let response = self.client.chat(&to_chat_request(&request)).await?;

        let mut choices = response.choices;
        choices.sort_by_key(|c| c.index);

        Ok(CompletionResponse {
            choices: choices
                .into_iter()
                .map(|c| c.message.content.unwrap_or_default())
                .collect(),
            model: if response.model.is_empty() {
                request.model
            } else {
                response.model
            },
        })
    }
}

/// Resolves the API key from config, falling back to the environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, BanterError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(BanterError::Config(format!(
            "OpenAI API key required. Set `openai.api_key` in banter.toml, \
             or the {API_KEY_ENV} or BANTER_OPENAI_API_KEY environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::ConversationTurn;
    use serial_test::serial;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        let config = OpenAiConfig {
            api_key: Some("sk-test".into()),
            base_url: server.uri(),
            ..OpenAiConfig::default()
        };
        OpenAiProvider::new(&config).unwrap()
    }

    #[tokio::test]
    async fn complete_sends_turns_in_order_and_returns_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_json(serde_json::json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "Hello! How can I assist you today?"},
                    {"role": "user", "content": "tell me a joke"}
                ],
                "temperature": 0.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gpt-4-0613",
                "choices": [
                    {"index": 1, "message": {"role": "assistant", "content": "second"}},
                    {"index": 0, "message": {"role": "assistant", "content": "Why did the crab never share?"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CompletionRequest {
            model: "gpt-4".into(),
            messages: vec![
                ConversationTurn::system("You are a helpful assistant."),
                ConversationTurn::user("hi"),
                ConversationTurn::assistant("Hello! How can I assist you today?"),
                ConversationTurn::user("tell me a joke"),
            ],
            temperature: Some(0.5),
        };

        let response = provider_for(&server).complete(request).await.unwrap();
        assert_eq!(
            response.first_choice(),
            Some("Why did the crab never share?")
        );
        assert_eq!(response.model, "gpt-4-0613");
    }

    #[tokio::test]
    async fn empty_choices_yield_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let response = provider_for(&server)
            .complete(CompletionRequest {
                model: "gpt-4".into(),
                messages: vec![ConversationTurn::user("hi")],
                temperature: None,
            })
            .await
            .unwrap();
        assert!(response.first_choice().is_none());
        assert_eq!(response.model, "gpt-4");
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        assert_eq!(resolve_api_key(&Some("sk-cfg".into())).unwrap(), "sk-cfg");
    }

    #[test]
    #[serial]
    fn resolve_api_key_falls_back_to_env() {
        // SAFETY: serialized with the other env-mutating tests in this crate.
        unsafe { std::env::set_var(API_KEY_ENV, "sk-env") };
        let result = resolve_api_key(&Some(String::new()));
        unsafe { std::env::remove_var(API_KEY_ENV) };
        assert_eq!(result.unwrap(), "sk-env");
    }

    #[test]
    #[serial]
    fn missing_key_is_config_error() {
        // SAFETY: serialized with the other env-mutating tests in this crate.
        unsafe { std::env::remove_var(API_KEY_ENV) };
        let err = resolve_api_key(&None).unwrap_err();
        assert!(matches!(err, BanterError::Config(_)));
        let message = err.to_string();
        assert!(message.contains(API_KEY_ENV));
        assert!(message.contains("openai.api_key"));
        assert!(message.contains("BANTER_OPENAI_API_KEY"));
    }
}
