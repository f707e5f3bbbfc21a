// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for the fallback route.
//!
//! The completion request is `[system instruction] + history + [current user
//! message]`, where history is the session's long-term log converted to turns.

use banter_core::{CompletionRequest, ConversationTurn, Intent, LongTermEntry};

/// Builds the system instruction, mentioning the previous intent when known.
pub fn system_instruction(system_prompt: &str, previous: Option<Intent>) -> String {
    match previous {
        Some(intent) if intent != Intent::Unknown => format!(
            "{system_prompt} The user's previous message was about: {intent}."
        ),
        _ => system_prompt.to_string(),
    }
}

/// Converts log entries to turns, dropping `current_id` and keeping the last `max_turns`.
pub fn history_turns(
    entries: &[LongTermEntry],
    current_id: Option<&str>,
    max_turns: usize,
) -> Vec<ConversationTurn> {
    let turns: Vec<ConversationTurn> = entries
        .iter()
        .filter(|entry| Some(entry.id.as_str()) != current_id)
        .map(LongTermEntry::to_turn)
        .collect();
    let skip = turns.len().saturating_sub(max_turns);
    turns.into_iter().skip(skip).collect()
}

/// Assembles the completion request.
pub fn assemble_request(
    system: String,
    history: Vec<ConversationTurn>,
    message: &str,
    model: &str,
    temperature: Option<f32>,
) -> CompletionRequest {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ConversationTurn::system(system));
    messages.extend(history);
    messages.push(ConversationTurn::user(message));

    CompletionRequest {
        model: model.to_string(),
        messages,
        temperature,
    }
}
