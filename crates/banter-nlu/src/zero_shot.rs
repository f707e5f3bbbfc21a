// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted zero-shot intent classification.

use async_trait::async_trait;
use banter_core::{
    AdapterType, BanterError, Classification, HealthStatus, Intent, IntentClassifier,
    PluginAdapter,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inference::{InferenceClient, Stage};

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

/// Classifies intents with a hosted zero-shot model (NLI-based).
pub struct ZeroShotClassifier {
    client: InferenceClient,
    model: String,
}

impl ZeroShotClassifier {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl PluginAdapter for ZeroShotClassifier {
    fn name(&self) -> &str {
        "zero-shot"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Classifier
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        // Probing would spend an inference call.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        Ok(())
    }
}

#[async_trait]
impl IntentClassifier for ZeroShotClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[Intent],
    ) -> Result<Classification, BanterError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels.iter().map(Intent::as_label).collect(),
            },
        };

        let response: ZeroShotResponse = self
            .client
            .infer(Stage::Classifier, &self.model, &request)
            .await?;

        let (label, score) = response
            .labels
            .iter()
            .zip(response.scores.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| BanterError::Classifier {
                message: "classifier returned no labels".into(),
                source: None,
            })?;

        debug!(label = %label, score, "zero-shot classification");

        Ok(Classification {
            intent: Intent::from_label(label),
            confidence: score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn classifier(server: &MockServer) -> ZeroShotClassifier {
        let client =
            InferenceClient::new(&server.uri(), Some("hf_test"), Duration::from_secs(5)).unwrap();
        ZeroShotClassifier::new(client, "facebook/bart-large-mnli")
    }

    #[tokio::test]
    async fn sends_candidate_labels_and_takes_top_score() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/facebook/bart-large-mnli"))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_json(serde_json::json!({
                "inputs": "Remind me to call Mom at 5 PM",
                "parameters": {"candidate_labels": [
                    "greeting", "goodbye", "weather", "reminder", "smalltalk", "unknown"
                ]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sequence": "Remind me to call Mom at 5 PM",
                "labels": ["reminder", "smalltalk", "unknown", "weather", "greeting", "goodbye"],
                "scores": [0.91, 0.03, 0.02, 0.02, 0.01, 0.01]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = classifier(&server)
            .classify("Remind me to call Mom at 5 PM", &Intent::ALL)
            .await
            .unwrap();
        assert_eq!(result.intent, Intent::Reminder);
        assert!((result.confidence - 0.91).abs() < 1e-6);
    }

    #[tokio::test]
    async fn unsorted_response_still_picks_highest() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "labels": ["unknown", "weather"],
                "scores": [0.2, 0.8]
            })))
            .mount(&server)
            .await;

        let result = classifier(&server)
            .classify("rain later?", &Intent::ALL)
            .await
            .unwrap();
        assert_eq!(result.intent, Intent::Weather);
    }

    #[tokio::test]
    async fn label_outside_set_maps_to_unknown() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "labels": ["booking"],
                "scores": [0.99]
            })))
            .mount(&server)
            .await;

        let result = classifier(&server)
            .classify("book a table", &Intent::ALL)
            .await
            .unwrap();
        assert_eq!(result.intent, Intent::Unknown);
    }

    #[tokio::test]
    async fn empty_label_list_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "labels": [],
                "scores": []
            })))
            .mount(&server)
            .await;

        let err = classifier(&server)
            .classify("hm", &Intent::ALL)
            .await
            .unwrap_err();
        assert!(matches!(err, BanterError::Classifier { .. }));
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": "Model facebook/bart-large-mnli is currently loading",
                "estimated_time": 20.0
            })))
            .mount(&server)
            .await;

        let err = classifier(&server)
            .classify("hello", &Intent::ALL)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("classifier error"), "got: {msg}");
        assert!(msg.contains("currently loading"), "got: {msg}");
    }
}
