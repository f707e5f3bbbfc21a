// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and entity extraction adapters.
//!
//! Two implementations of each adapter: a hosted model behind an inference
//! API, and a local heuristic that needs no network. [`build_classifier`] and
//! [`build_extractor`] pick one from `[nlu]` config.

pub mod inference;
pub mod keyword;
pub mod ner;
pub mod rules;
pub mod zero_shot;

use std::sync::Arc;
use std::time::Duration;

use banter_config::model::{ClassifierKind, ExtractorKind, NluConfig};
use banter_core::{BanterError, EntityExtractor, IntentClassifier, PluginAdapter};
use tracing::info;

pub use inference::InferenceClient;
pub use keyword::KeywordClassifier;
pub use ner::HostedExtractor;
pub use rules::RuleExtractor;
pub use zero_shot::ZeroShotClassifier;

fn inference_client(config: &NluConfig) -> Result<InferenceClient, BanterError> {
    InferenceClient::new(
        &config.inference_url,
        config.api_token.as_deref(),
        Duration::from_secs(config.timeout_secs),
    )
}

/// Builds the configured intent classifier.
pub fn build_classifier(config: &NluConfig) -> Result<Arc<dyn IntentClassifier>, BanterError> {
    let classifier: Arc<dyn IntentClassifier> = match config.classifier {
        ClassifierKind::Keyword => Arc::new(KeywordClassifier::new()),
        ClassifierKind::Hosted => Arc::new(ZeroShotClassifier::new(
            inference_client(config)?,
            config.classifier_model.clone(),
        )),
    };
    info!(classifier = classifier.name(), "intent classifier ready");
    Ok(classifier)
}

/// Builds the configured entity extractor.
pub fn build_extractor(config: &NluConfig) -> Result<Arc<dyn EntityExtractor>, BanterError> {
    let extractor: Arc<dyn EntityExtractor> = match config.extractor {
        ExtractorKind::Rules => Arc::new(RuleExtractor::new()),
        ExtractorKind::Hosted => Arc::new(HostedExtractor::new(
            inference_client(config)?,
            config.ner_model.clone(),
        )),
    };
    info!(extractor = extractor.name(), "entity extractor ready");
    Ok(extractor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_local_adapters() {
        let config = NluConfig::default();
        assert_eq!(build_classifier(&config).unwrap().name(), "keyword");
        assert_eq!(build_extractor(&config).unwrap().name(), "rules");
    }

    #[test]
    fn hosted_kinds_build_hosted_adapters() {
        let config = NluConfig {
            classifier: ClassifierKind::Hosted,
            extractor: ExtractorKind::Hosted,
            ..NluConfig::default()
        };
        assert_eq!(build_classifier(&config).unwrap().name(), "zero-shot");
        assert_eq!(build_extractor(&config).unwrap().name(), "hosted-ner");
    }
}
