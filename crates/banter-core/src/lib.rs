// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Banter chatbot.
//!
//! This crate provides the trait definitions, error type, and common types
//! used throughout the Banter workspace. Every external collaborator (intent
//! classifier, entity extractor, completion API, key-value store, document
//! store) sits behind a trait defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BanterError;
pub use types::{
    AdapterType, Classification, CompletionRequest, CompletionResponse, ConversationTurn,
    ENTITY_TIME, EntityMap, HealthStatus, Intent, LongTermEntry, Role, SessionId,
};

pub use traits::{
    CompletionProvider, EntityExtractor, IntentClassifier, LongTermStore, PluginAdapter,
    ShortTermStore,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banter_error_has_all_variants() {
        let _config = BanterError::Config("test".into());
        let _storage = BanterError::storage(std::io::Error::other("test"));
        let _classifier = BanterError::Classifier {
            message: "test".into(),
            source: None,
        };
        let _extractor = BanterError::Extractor {
            message: "test".into(),
            source: None,
        };
        let _provider = BanterError::Provider {
            message: "test".into(),
            source: None,
        };
        let _timeout = BanterError::Timeout {
            duration: std::time::Duration::from_secs(5),
        };
        let _internal = BanterError::Internal("test".into());
    }

    #[test]
    fn storage_error_displays_source() {
        let err = BanterError::storage("connection refused");
        assert_eq!(err.to_string(), "storage error: connection refused");
    }

    #[test]
    fn adapter_type_round_trips_through_display() {
        use std::str::FromStr;

        for variant in [
            AdapterType::Classifier,
            AdapterType::Extractor,
            AdapterType::Provider,
            AdapterType::ShortTermStore,
            AdapterType::LongTermStore,
        ] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_classifier<T: IntentClassifier>() {}
        fn _assert_extractor<T: EntityExtractor>() {}
        fn _assert_provider<T: CompletionProvider>() {}
        fn _assert_short_term<T: ShortTermStore>() {}
        fn _assert_long_term<T: LongTermStore>() {}
    }
}
