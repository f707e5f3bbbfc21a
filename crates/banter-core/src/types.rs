// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the adapters, the memory façade, and the orchestrator.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Returns the underlying key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Classifier,
    Extractor,
    Provider,
    ShortTermStore,
    LongTermStore,
}

/// The fixed label set offered to the intent classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Goodbye,
    Weather,
    Reminder,
    Smalltalk,
    Unknown,
}

impl Intent {
    /// Candidate labels in the order they are offered to the classifier.
    pub const ALL: [Intent; 6] = [
        Intent::Greeting,
        Intent::Goodbye,
        Intent::Weather,
        Intent::Reminder,
        Intent::Smalltalk,
        Intent::Unknown,
    ];

    /// Parses a label returned by a classifier. Labels outside the set map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(Intent::Unknown)
    }

    /// The lowercase label string.
    pub fn as_label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Goodbye => "goodbye",
            Intent::Weather => "weather",
            Intent::Reminder => "reminder",
            Intent::Smalltalk => "smalltalk",
            Intent::Unknown => "unknown",
        }
    }
}

/// Result of classifying a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Highest-scoring label.
    pub intent: Intent,
    /// Score of that label (0.0-1.0).
    pub confidence: f32,
}

/// Entity-type tag (`TIME`, `DATE`, ...) to extracted text span.
pub type EntityMap = BTreeMap<String, String>;

/// Entity tag for time expressions.
pub const ENTITY_TIME: &str = "TIME";

/// Author of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn handed to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One immutable record of the long-term conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongTermEntry {
    /// Globally unique id (`{session_id}-{uuid}`).
    pub id: String,
    /// Owning session. Never empty.
    pub session_id: String,
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub message: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

impl LongTermEntry {
    /// Parses the stored timestamp.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// True when the entry satisfies the log invariants (non-empty session, parseable time).
    pub fn is_well_formed(&self) -> bool {
        !self.session_id.is_empty() && self.parsed_timestamp().is_some()
    }

    /// Converts the entry into a prompt turn using its stored role.
    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn {
            role: self.role,
            content: self.message.clone(),
        }
    }
}

/// A request to the completion API.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "gpt-4").
    pub model: String,
    /// Ordered conversation turns.
    pub messages: Vec<ConversationTurn>,
    /// Sampling temperature, omitted when `None`.
    pub temperature: Option<f32>,
}

/// A response from the completion API.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Candidate completions in the order the API ranked them.
    pub choices: Vec<String>,
    /// Model that produced the response.
    pub model: String,
}

impl CompletionResponse {
    /// The top candidate's text.
    pub fn first_choice(&self) -> Option<&str> {
        self.choices.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_labels_parse_case_insensitively() {
        assert_eq!(Intent::from_label("Greeting"), Intent::Greeting);
        assert_eq!(Intent::from_label(" reminder "), Intent::Reminder);
        assert_eq!(Intent::from_label("SMALLTALK"), Intent::Smalltalk);
    }

    #[test]
    fn unknown_labels_fall_back_to_unknown() {
        assert_eq!(Intent::from_label("booking"), Intent::Unknown);
        assert_eq!(Intent::from_label(""), Intent::Unknown);
    }

    #[test]
    fn intent_display_matches_label() {
        for intent in Intent::ALL {
            assert_eq!(intent.to_string(), intent.as_label());
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn long_term_entry_invariants() {
        let mut entry = LongTermEntry {
            id: "s-1".into(),
            session_id: "s".into(),
            role: Role::User,
            message: "hi".into(),
            timestamp: "2026-03-01T10:00:00.000000Z".into(),
        };
        assert!(entry.is_well_formed());
        assert_eq!(entry.to_turn(), ConversationTurn::user("hi"));

        entry.timestamp = "yesterday".into();
        assert!(!entry.is_well_formed());

        entry.timestamp = "2026-03-01T10:00:00Z".into();
        entry.session_id.clear();
        assert!(!entry.is_well_formed());
    }

    #[test]
    fn first_choice_of_empty_response_is_none() {
        let resp = CompletionResponse {
            choices: vec![],
            model: "gpt-4".into(),
        };
        assert!(resp.first_choice().is_none());
    }
}
