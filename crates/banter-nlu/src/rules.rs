// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern-based entity extraction.
//!
//! Recognizes clock times, relative and calendar dates, and capitalized place
//! names after a locative preposition. Tags follow the common NER label set
//! (`TIME`, `DATE`, `GPE`).

use std::sync::LazyLock;

use async_trait::async_trait;
use banter_core::types::ENTITY_TIME;
use banter_core::{
    AdapterType, BanterError, EntityExtractor, EntityMap, HealthStatus, PluginAdapter,
};
use regex::Regex;

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{1,2}(?::\d{2})?\s?(?:a\.?m\.?|p\.?m\.?)|\d{1,2}:\d{2}|noon|midnight|(?:this|tomorrow)\s+(?:morning|afternoon|evening))(?:\b|$)",
    )
    .expect("valid regex")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:today|tomorrow|tonight|yesterday|(?:next|this|last)\s+(?:week|month|year|monday|tuesday|wednesday|thursday|friday|saturday|sunday)|(?:on\s+)?(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)|(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\s+\d{1,2}(?:st|nd|rd|th)?|\d{4}-\d{2}-\d{2})\b",
    )
    .expect("valid regex")
});

// Case-sensitive: place names are capitalized.
static GPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in|at|to|from|for)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").expect("valid regex")
});

/// Regex-driven entity extractor.
#[derive(Debug, Default)]
pub struct RuleExtractor;

impl RuleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts entities without going through the async adapter interface.
    pub fn extract_sync(&self, text: &str) -> EntityMap {
        let mut entities = EntityMap::new();

        // Later matches overwrite earlier ones for the same tag.
        for m in TIME_RE.find_iter(text) {
            entities.insert(ENTITY_TIME.to_string(), m.as_str().trim().to_string());
        }
        for m in DATE_RE.find_iter(text) {
            let span = m.as_str().trim();
            let span = span
                .strip_prefix("on ")
                .or_else(|| span.strip_prefix("On "))
                .unwrap_or(span);
            entities.insert("DATE".to_string(), span.to_string());
        }
        for caps in GPE_RE.captures_iter(text) {
            if let Some(place) = caps.get(1) {
                if is_weekday_or_month(place.as_str()) {
                    continue;
                }
                entities.insert("GPE".to_string(), place.as_str().to_string());
            }
        }

        entities
    }
}

const CALENDAR_WORDS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december",
];

fn is_weekday_or_month(span: &str) -> bool {
    let first = span.split_whitespace().next().unwrap_or(span).to_lowercase();
    CALENDAR_WORDS.contains(&first.as_str())
}

#[async_trait]
impl PluginAdapter for RuleExtractor {
    fn name(&self) -> &str {
        "rules"
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
impl EntityExtractor for RuleExtractor {
    async fn extract(&self, text: &str) -> Result<EntityMap, BanterError> {
        Ok(self.extract_sync(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> EntityMap {
        RuleExtractor::new().extract_sync(text)
    }

    #[test]
    fn clock_time_with_meridiem() {
        let entities = extract("Remind me to call Mom at 5 PM");
        assert_eq!(entities.get("TIME").map(String::as_str), Some("5 PM"));
        assert!(!entities.contains_key("GPE"));
    }

    #[test]
    fn twenty_four_hour_time() {
        let entities = extract("meeting at 17:30");
        assert_eq!(entities.get("TIME").map(String::as_str), Some("17:30"));
    }

    #[test]
    fn last_time_wins() {
        let entities = extract("not at 3pm, make it 4:15 pm");
        assert_eq!(entities.get("TIME").map(String::as_str), Some("4:15 pm"));
    }

    #[test]
    fn relative_dates() {
        assert_eq!(
            extract("remind me tomorrow at noon").get("DATE").map(String::as_str),
            Some("tomorrow")
        );
        assert_eq!(
            extract("see you next Friday").get("DATE").map(String::as_str),
            Some("next Friday")
        );
        assert_eq!(
            extract("dinner on Sunday").get("DATE").map(String::as_str),
            Some("Sunday")
        );
    }

    #[test]
    fn place_after_preposition() {
        let entities = extract("What's the weather in New York today?");
        assert_eq!(entities.get("GPE").map(String::as_str), Some("New York"));
        assert_eq!(entities.get("DATE").map(String::as_str), Some("today"));
    }

    #[test]
    fn weekday_after_preposition_is_not_a_place() {
        let entities = extract("move it to Monday");
        assert!(!entities.contains_key("GPE"));
    }

    #[test]
    fn nothing_to_extract() {
        assert!(extract("hello there").is_empty());
    }
}
