// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted intent classifier and entity extractor.
//!
//! Each mock pops its next answer from a FIFO queue. An empty queue yields
//! the neutral answer (`unknown` with full confidence, or no entities).

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use banter_core::{
    AdapterType, BanterError, Classification, EntityExtractor, EntityMap, HealthStatus, Intent,
    IntentClassifier, PluginAdapter,
};

/// A classifier that returns pre-configured intents.
#[derive(Default)]
pub struct MockClassifier {
    script: Mutex<VecDeque<Result<Intent, String>>>,
    calls: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the intent for the next call.
    pub async fn push(&self, intent: Intent) {
        self.script.lock().await.push_back(Ok(intent));
    }

    /// Makes the next call fail with a classifier error.
    pub async fn fail_next(&self, message: &str) {
        self.script.lock().await.push_back(Err(message.to_string()));
    }

    /// Texts classified so far.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Classifier
    }

    async fn health_check(&self) -> Result<HealthStatus, BanterError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BanterError> {
        Ok(())
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(
        &self,
        text: &str,
        _labels: &[Intent],
    ) -> Result<Classification, BanterError> {
        self.calls.lock().await.push(text.to_string());
        match self.script.lock().await.pop_front() {
            Some(Ok(intent)) => Ok(Classification {
                intent,
                confidence: 1.0,
            }),
            Some(Err(message)) => Err(BanterError::Classifier {
                message,
                source: None,
            }),
            None => Ok(Classification {
                intent: Intent::Unknown,
                confidence: 1.0,
            }),
        }
    }
}

/// An extractor that returns pre-configured entity maps.
#[derive(Default)]
pub struct MockExtractor {
    script: Mutex<VecDeque<Result<EntityMap, String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the entities for the next call.
    pub async fn push<'a>(&self, entities: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let map = entities
            .into_iter()
            .map(|(tag, span)| (tag.to_string(), span.to_string()))
            .collect();
        self.script.lock().await.push_back(Ok(map));
    }

    /// Makes the next call fail with an extractor error.
    pub async fn fail_next(&self, message: &str) {
        self.script.lock().await.push_back(Err(message.to_string()));
    }
}

#[async_trait]
impl PluginAdapter for MockExtractor {
    fn name(&self) -> &str {
        "mock-extractor"
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
impl EntityExtractor for MockExtractor {
    async fn extract(&self, _text: &str) -> Result<EntityMap, BanterError> {
        match self.script.lock().await.pop_front() {
            Some(Ok(map)) => Ok(map),
            Some(Err(message)) => Err(BanterError::Extractor {
                message,
                source: None,
            }),
            None => Ok(EntityMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn classifier_pops_in_order_then_defaults() {
        let classifier = MockClassifier::new();
        classifier.push(Intent::Greeting).await;
        classifier.fail_next("boom").await;

        let first = classifier.classify("hi", &Intent::ALL).await.unwrap();
        assert_eq!(first.intent, Intent::Greeting);
        assert!(classifier.classify("x", &Intent::ALL).await.is_err());
        let third = classifier.classify("y", &Intent::ALL).await.unwrap();
        assert_eq!(third.intent, Intent::Unknown);
        assert_eq!(classifier.calls().await, ["hi", "x", "y"]);
    }

    #[tokio::test]
    async fn extractor_returns_scripted_map() {
        let extractor = MockExtractor::new();
        extractor.push([("TIME", "5 PM")]).await;

        let map = extractor.extract("at 5 PM").await.unwrap();
        assert_eq!(map.get("TIME").map(String::as_str), Some("5 PM"));
        assert!(extractor.extract("again").await.unwrap().is_empty());
    }
}
