// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic intent classification.
//!
//! Scores each candidate label from keyword signals without any network
//! call. Useful offline and as the default when no inference token
//! is configured.

use async_trait::async_trait;
use banter_core::{
    AdapterType, BanterError, Classification, HealthStatus, Intent, IntentClassifier,
    PluginAdapter,
};

/// Whole-message greetings (exact match after trimming punctuation).
const GREETING_EXACT: &[&str] = &[
    "hi", "hello", "hey", "hiya", "yo", "howdy", "good morning", "good afternoon",
    "good evening", "greetings",
];

/// Greeting openers (message starts with).
const GREETING_PREFIX: &[&str] = &["hi ", "hello ", "hey ", "good morning", "good evening"];

const GOODBYE: &[&str] = &[
    "bye", "goodbye", "good bye", "see you", "see ya", "farewell", "good night", "talk later",
    "gotta go", "take care",
];

const WEATHER: &[&str] = &[
    "weather", "forecast", "temperature", "rain", "raining", "sunny", "snow", "snowing",
    "umbrella", "humid", "windy", "storm", "degrees",
];

const REMINDER: &[&str] = &[
    "remind", "reminder", "don't let me forget", "dont let me forget", "alarm",
    "schedule", "set a timer", "wake me",
];

const SMALLTALK: &[&str] = &[
    "how are you", "how's it going", "hows it going", "what's up", "whats up",
    "how was your day", "who are you", "what's your name", "tell me about yourself",
    "are you a bot", "thank you", "thanks",
];

/// Keyword-driven intent classifier.
pub struct KeywordClassifier {
    /// Below this score the message is labelled `unknown`.
    min_confidence: f32,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self {
            min_confidence: 0.3,
        }
    }

    pub fn with_threshold(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    /// Raw score for one label, in 0..=1.
    fn score(intent: Intent, lower: &str, normalized: &str) -> f32 {
        match intent {
            Intent::Greeting => {
                if GREETING_EXACT.contains(&normalized) {
                    0.95
                } else if GREETING_PREFIX.iter().any(|p| normalized.starts_with(p)) {
                    0.6
                } else {
                    0.0
                }
            }
            Intent::Goodbye => {
                if GOODBYE.contains(&normalized) {
                    0.95
                } else if GOODBYE.iter().any(|p| lower.contains(p)) {
                    0.6
                } else {
                    0.0
                }
            }
            Intent::Weather => hits(WEATHER, lower, 0.5),
            Intent::Reminder => hits(REMINDER, lower, 0.7),
            Intent::Smalltalk => hits(SMALLTALK, lower, 0.6),
            Intent::Unknown => 0.0,
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// First hit is worth `base`, each further hit adds a little.
fn hits(patterns: &[&str], lower: &str, base: f32) -> f32 {
    let count = patterns.iter().filter(|p| lower.contains(*p)).count();
    if count == 0 {
        0.0
    } else {
        (base + 0.1 * (count - 1) as f32).min(1.0)
    }
}

#[async_trait]
impl PluginAdapter for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
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
impl IntentClassifier for KeywordClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[Intent],
    ) -> Result<Classification, BanterError> {
        if labels.is_empty() {
            return Err(BanterError::Classifier {
                message: "no candidate labels".into(),
                source: None,
            });
        }

        let lower = text.trim().to_lowercase();
        let normalized = lower.trim_end_matches(['!', '.', '?', ',', ' ']);

        // Ties go to the label listed first.
        let mut best: Option<(Intent, f32)> = None;
        for &label in labels {
            let score = Self::score(label, &lower, normalized);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((label, score));
            }
        }

        let (intent, confidence) = best.unwrap_or((Intent::Unknown, 0.0));
        if confidence < self.min_confidence && labels.contains(&Intent::Unknown) {
            return Ok(Classification {
                intent: Intent::Unknown,
                confidence: 1.0 - confidence,
            });
        }

        Ok(Classification { intent, confidence })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn classify(text: &str) -> Classification {
        KeywordClassifier::new()
            .classify(text, &Intent::ALL)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn greetings() {
        for text in ["Hello!", "hi", "Hey there", "Good morning."] {
            assert_eq!(classify(text).await.intent, Intent::Greeting, "{text}");
        }
    }

    #[tokio::test]
    async fn goodbyes() {
        for text in ["bye", "Goodbye!", "ok, see you tomorrow"] {
            assert_eq!(classify(text).await.intent, Intent::Goodbye, "{text}");
        }
    }

    #[tokio::test]
    async fn weather_questions() {
        let result = classify("What's the weather like today?").await;
        assert_eq!(result.intent, Intent::Weather);
        assert!(result.confidence >= 0.5);
    }

    #[tokio::test]
    async fn reminders_beat_other_signals() {
        let result = classify("Remind me to call Mom at 5 PM").await;
        assert_eq!(result.intent, Intent::Reminder);
    }

    #[tokio::test]
    async fn smalltalk() {
        assert_eq!(classify("how are you doing?").await.intent, Intent::Smalltalk);
    }

    #[tokio::test]
    async fn no_signal_is_unknown() {
        let result = classify("Explain the difference between TCP and UDP").await;
        assert_eq!(result.intent, Intent::Unknown);
        assert!(result.confidence > 0.5);
    }

    #[tokio::test]
    async fn only_offered_labels_are_returned() {
        let result = KeywordClassifier::new()
            .classify("hello", &[Intent::Weather, Intent::Reminder])
            .await
            .unwrap();
        assert!(matches!(result.intent, Intent::Weather | Intent::Reminder));
    }

    #[tokio::test]
    async fn empty_labels_is_an_error() {
        let err = KeywordClassifier::new().classify("hi", &[]).await.unwrap_err();
        assert!(matches!(err, BanterError::Classifier { .. }));
    }

    #[test]
    fn hits_accumulate_but_cap() {
        assert_eq!(hits(WEATHER, "nothing here", 0.5), 0.0);
        assert!(hits(WEATHER, "rain snow storm windy humid degrees", 0.5) <= 1.0);
    }
}
