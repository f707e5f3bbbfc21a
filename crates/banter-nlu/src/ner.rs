// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted token-classification (NER) entity extraction.

use async_trait::async_trait;
use banter_core::{
    AdapterType, BanterError, EntityExtractor, EntityMap, HealthStatus, PluginAdapter,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inference::{InferenceClient, Stage};

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    inputs: &'a str,
}

/// One aggregated entity as returned by the inference API.
#[derive(Debug, Deserialize)]
struct NerEntity {
    entity_group: String,
    word: String,
    #[serde(default)]
    score: f32,
}

/// Extracts entities with a hosted NER model.
pub struct HostedExtractor {
    client: InferenceClient,
    model: String,
}

impl HostedExtractor {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

/// Maps model-specific group names onto the tag set the router understands.
fn normalize_tag(group: &str) -> String {
    match group.to_ascii_uppercase().as_str() {
        "PER" => "PERSON".to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl PluginAdapter for HostedExtractor {
    fn name(&self) -> &str {
        "hosted-ner"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Extractor
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        Ok(())
    }
}

#[async_trait]
impl EntityExtractor for HostedExtractor {
    async fn extract(&self, text: &str) -> Result<EntityMap, BanterError> {
        let entities: Vec<NerEntity> = self
            .client
            .infer(Stage::Extractor, &self.model, &NerRequest { inputs: text })
            .await?;

        let mut map = EntityMap::new();
        for entity in entities {
            debug!(group = %entity.entity_group, word = %entity.word, score = entity.score, "entity");
            map.insert(normalize_tag(&entity.entity_group), entity.word.trim().to_string());
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extractor(server: &MockServer) -> HostedExtractor {
        let client = InferenceClient::new(&server.uri(), None, Duration::from_secs(5)).unwrap();
        HostedExtractor::new(client, "dslim/bert-base-NER")
    }

    #[tokio::test]
    async fn groups_become_tags_and_last_span_wins() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/dslim/bert-base-NER"))
            .and(body_json(serde_json::json!({"inputs": "Ask Ana and Bo about Paris"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"entity_group": "PER", "word": "Ana", "score": 0.99, "start": 4, "end": 7},
                {"entity_group": "PER", "word": "Bo", "score": 0.97, "start": 12, "end": 14},
                {"entity_group": "LOC", "word": "Paris", "score": 0.99, "start": 21, "end": 26}
            ])))
            .mount(&server)
            .await;

        let entities = extractor(&server)
            .extract("Ask Ana and Bo about Paris")
            .await
            .unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities.get("PERSON").map(String::as_str), Some("Bo"));
        assert_eq!(entities.get("LOC").map(String::as_str), Some("Paris"));
    }

    #[tokio::test]
    async fn empty_response_is_empty_map() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        assert!(extractor(&server).extract("hello").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn http_failure_is_extractor_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = extractor(&server).extract("hello").await.unwrap_err();
        assert!(matches!(err, BanterError::Extractor { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
