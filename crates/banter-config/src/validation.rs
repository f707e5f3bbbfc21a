// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the semantic constraints serde cannot express: non-empty names and
//! paths, positive limits, and the temperature range.

use crate::diagnostic::ConfigError;
use crate::model::BanterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &BanterConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(
            "agent.log_level",
            format!(
                "must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        ));
    }

    if config.agent.history_turns == 0 {
        errors.push(ConfigError::validation(
            "agent.history_turns",
            "must be greater than 0",
        ));
    }

    if config.agent.terminal_session_id.trim().is_empty() {
        errors.push(ConfigError::validation(
            "agent.terminal_session_id",
            "must not be empty",
        ));
    }

    if let Some(t) = config.openai.temperature
        && !(0.0..=2.0).contains(&t)
    {
        errors.push(ConfigError::validation(
            "openai.temperature",
            format!("must be between 0 and 2, got {t}"),
        ));
    }

    if config.openai.model.trim().is_empty() {
        errors.push(ConfigError::validation("openai.model", "must not be empty"));
    }

    let short_term = &config.memory.short_term;
    if short_term.host.trim().is_empty() {
        errors.push(ConfigError::validation(
            "memory.short_term.host",
            "must not be empty",
        ));
    }
    if short_term.ttl_secs == 0 {
        errors.push(ConfigError::validation(
            "memory.short_term.ttl_secs",
            "must be greater than 0",
        ));
    }

    let long_term = &config.memory.long_term;
    if long_term.path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "memory.long_term.path",
            "must not be empty",
        ));
    }
    if long_term.collection.trim().is_empty() {
        errors.push(ConfigError::validation(
            "memory.long_term.collection",
            "must not be empty",
        ));
    }
    if long_term.max_results == 0 {
        errors.push(ConfigError::validation(
            "memory.long_term.max_results",
            "must be greater than 0",
        ));
    }

    for (key, secs) in [
        ("memory.short_term.timeout_secs", short_term.timeout_secs),
        ("memory.long_term.timeout_secs", long_term.timeout_secs),
        ("openai.timeout_secs", config.openai.timeout_secs),
        ("nlu.timeout_secs", config.nlu.timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::validation(key, "must be greater than 0"));
        }
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::validation("gateway.host", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
