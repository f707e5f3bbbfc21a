// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./banter.toml` > `~/.config/banter/banter.toml` > `/etc/banter/banter.toml`
//! with environment variable overrides via the `BANTER_` prefix and the plain
//! names older deployments export (`OPENAI_API_KEY`, `REDIS_HOST`, ...).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BanterConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/banter/banter.toml";

/// Local config file, resolved against the working directory.
pub const LOCAL_CONFIG_PATH: &str = "banter.toml";

/// Plain environment names and the config keys they set.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("openai_api_key", "openai.api_key"),
    ("redis_host", "memory.short_term.host"),
    ("redis_port", "memory.short_term.port"),
    ("redis_password", "memory.short_term.password"),
    ("redis_ttl", "memory.short_term.ttl_secs"),
];

/// `BANTER_` section prefixes, longest first so nested sections win.
const SECTION_PREFIXES: &[(&str, &str)] = &[
    ("memory_short_term_", "memory.short_term."),
    ("memory_long_term_", "memory.long_term."),
    ("memory_", "memory."),
    ("agent_", "agent."),
    ("openai_", "openai."),
    ("nlu_", "nlu."),
    ("gateway_", "gateway."),
];

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("banter/banter.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/banter/banter.toml` (system-wide)
/// 3. `~/.config/banter/banter.toml` (user XDG config)
/// 4. `./banter.toml` (local directory)
/// 5. Plain env names (`OPENAI_API_KEY`, `REDIS_*`)
/// 6. `BANTER_*` environment variables
pub fn load_config() -> Result<BanterConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BanterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BanterConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BanterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BanterConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BanterConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Plain env names, matched case-insensitively.
fn legacy_env_provider() -> Env {
    Env::raw()
        .filter(|key| legacy_key(key.as_str()).is_some())
        .map(|key| {
            legacy_key(key.as_str())
                .unwrap_or(key.as_str())
                .to_string()
                .into()
        })
}

fn legacy_key(env_name: &str) -> Option<&'static str> {
    let lowered = env_name.to_ascii_lowercase();
    LEGACY_ENV_KEYS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, key)| *key)
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")`: `BANTER_MEMORY_SHORT_TERM_TTL_SECS`
/// must map to `memory.short_term.ttl_secs`, not `memory.short.term.ttl.secs`.
fn env_provider() -> Env {
    Env::prefixed("BANTER_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped `BANTER_` variable name to its dotted config key.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for (prefix, section) in SECTION_PREFIXES {
        if let Some(rest) = key.strip_prefix(prefix) {
            return format!("{section}{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sections_map_before_parent() {
        assert_eq!(
            map_env_key("memory_short_term_ttl_secs"),
            "memory.short_term.ttl_secs"
        );
        assert_eq!(
            map_env_key("MEMORY_LONG_TERM_MAX_RESULTS"),
            "memory.long_term.max_results"
        );
        assert_eq!(map_env_key("memory_telemetry"), "memory.telemetry");
    }

    #[test]
    fn underscored_field_names_survive_mapping() {
        assert_eq!(map_env_key("openai_api_key"), "openai.api_key");
        assert_eq!(map_env_key("agent_history_turns"), "agent.history_turns");
        assert_eq!(map_env_key("gateway_session_mode"), "gateway.session_mode");
    }

    #[test]
    fn legacy_names_match_case_insensitively() {
        assert_eq!(legacy_key("REDIS_TTL"), Some("memory.short_term.ttl_secs"));
        assert_eq!(legacy_key("openai_api_key"), Some("openai.api_key"));
        assert_eq!(legacy_key("REDIS_DB"), None);
    }
}
