// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Banter configuration system.

use std::path::Path;

use banter_config::diagnostic::ConfigError;
use banter_config::model::{BanterConfig, SessionMode, ShortTermBackend};
use banter_config::{
    load_and_validate, load_and_validate_str, load_config_from_path, load_config_from_str,
};
use figment::Jail;

/// A file exercising every section deserializes field by field.
#[test]
fn full_toml_deserializes_into_banter_config() {
    let toml = r#"
[agent]
name = "helper"
log_level = "debug"
system_prompt = "Be brief."
history_turns = 4
terminal_session_id = "local"

[openai]
api_key = "sk-test"
model = "gpt-4o-mini"
temperature = 0.3
base_url = "http://localhost:9999/v1"

[nlu]
classifier = "hosted"
extractor = "hosted"
api_token = "hf_abc"

[memory]
telemetry = true

[memory.short_term]
backend = "memory"
host = "cache.internal"
port = 6380
password = "secret"
ttl_secs = 120

[memory.long_term]
path = "/tmp/banter/log.db"
collection = "chat"
max_results = 25

[gateway]
host = "0.0.0.0"
port = 8080
session_mode = "remote_addr"
static_dir = "/srv/banter"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helper");
    assert_eq!(config.agent.history_turns, 4);
    assert_eq!(config.agent.terminal_session_id, "local");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.temperature, Some(0.3));
    assert_eq!(config.nlu.api_token.as_deref(), Some("hf_abc"));
    assert!(config.memory.telemetry);
    assert_eq!(config.memory.short_term.backend, ShortTermBackend::Memory);
    assert_eq!(config.memory.short_term.port, 6380);
    assert_eq!(config.memory.short_term.password.as_deref(), Some("secret"));
    assert_eq!(config.memory.short_term.ttl_secs, 120);
    assert_eq!(config.memory.long_term.collection, "chat");
    assert_eq!(config.memory.long_term.max_results, 25);
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.session_mode, SessionMode::RemoteAddr);
    assert_eq!(config.gateway.static_dir.as_deref(), Some("/srv/banter"));
}

/// Sections left out of the file fall back to defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("[agent]\nname = \"x\"\n").unwrap();
    assert_eq!(config.openai.model, "gpt-4");
    assert!(config.openai.temperature.is_none());
    assert_eq!(config.memory.short_term.backend, ShortTermBackend::Redis);
    assert_eq!(config.memory.short_term.timeout_secs, 5);
    assert_eq!(config.memory.long_term.timeout_secs, 10);
    assert_eq!(config.gateway.session_mode, SessionMode::Token);
}

/// Unknown keys in nested tables are rejected.
#[test]
fn unknown_field_in_nested_section_is_rejected() {
    let toml = r#"
[memory.long_term]
collecton = "chat"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            valid_keys,
            ..
        } => {
            assert!(key.ends_with("collecton"), "got key {key}");
            assert_eq!(suggestion.as_deref(), Some("collection"));
            assert!(valid_keys.contains("max_results"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown top-level tables are rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let err = load_config_from_str("[redis]\nhost = \"x\"\n").expect_err("unknown section");
    assert!(err.to_string().contains("redis"), "got: {err}");
}

/// A string where a number is expected becomes an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type() {
    let errors = load_and_validate_str("[memory.short_term]\nport = \"high\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got {errors:?}"
    );
}

/// Validation failures surface after successful deserialization.
#[test]
fn load_and_validate_reports_semantic_errors() {
    let errors = load_and_validate_str(
        r#"
[openai]
temperature = 3.0

[memory.short_term]
ttl_secs = 0
"#,
    )
    .unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Config errors render through miette without panicking.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let errors = load_and_validate_str("[agent]\nnaem = \"x\"\n").unwrap_err();
    let diagnostic: &dyn Diagnostic = &errors[0];
    assert!(diagnostic.code().is_some());

    let mut out = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut out, diagnostic)
        .unwrap();
    assert!(out.contains("naem"));
}

/// `BANTER_*` variables reach nested sections with underscored field names.
#[test]
fn banter_env_vars_override_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            "[memory.short_term]\nttl_secs = 60\n\n[openai]\nmodel = \"gpt-3.5-turbo\"\n",
        )?;
        jail.set_env("BANTER_MEMORY_SHORT_TERM_TTL_SECS", "900");
        jail.set_env("BANTER_MEMORY_LONG_TERM_COLLECTION", "archive");
        jail.set_env("BANTER_GATEWAY_SESSION_MODE", "remote_addr");

        let config = load_config_from_path(Path::new("custom.toml"))?;
        assert_eq!(config.memory.short_term.ttl_secs, 900);
        assert_eq!(config.memory.long_term.collection, "archive");
        assert_eq!(config.gateway.session_mode, SessionMode::RemoteAddr);
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        Ok(())
    });
}

/// The plain names older deployments export are still honored.
#[test]
fn legacy_env_names_are_honored() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-legacy");
        jail.set_env("REDIS_HOST", "redis.internal");
        jail.set_env("REDIS_PORT", "6390");
        jail.set_env("REDIS_PASSWORD", "hunter2");
        jail.set_env("REDIS_TTL", "1800");

        let config = load_config_from_path(Path::new("absent.toml"))?;
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-legacy"));
        assert_eq!(config.memory.short_term.host, "redis.internal");
        assert_eq!(config.memory.short_term.port, 6390);
        assert_eq!(config.memory.short_term.password.as_deref(), Some("hunter2"));
        assert_eq!(config.memory.short_term.ttl_secs, 1800);
        Ok(())
    });
}

/// `BANTER_*` wins over the plain name when both are set.
#[test]
fn prefixed_env_beats_legacy_env() {
    Jail::expect_with(|jail| {
        jail.set_env("REDIS_HOST", "legacy-host");
        jail.set_env("BANTER_MEMORY_SHORT_TERM_HOST", "prefixed-host");

        let config = load_config_from_path(Path::new("absent.toml"))?;
        assert_eq!(config.memory.short_term.host, "prefixed-host");
        Ok(())
    });
}

/// `./banter.toml` in the working directory is picked up by the default loader.
#[test]
fn local_config_file_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file("banter.toml", "[agent]\nname = \"jailed\"\n")?;

        let config = load_and_validate().map_err(|errors| format!("{errors:?}"))?;
        assert_eq!(config.agent.name, "jailed");
        Ok(())
    });
}

/// Defaults survive a round trip through the serialized provider.
#[test]
fn serialized_defaults_are_sensible() {
    let config = BanterConfig::default();
    assert_eq!(config.agent.system_prompt, "You are a helpful assistant.");
    assert_eq!(config.agent.terminal_session_id, "test_session");
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert!(config.memory.long_term.path.ends_with("memory.db"));
    assert_eq!(config.gateway.port, 5000);
}
