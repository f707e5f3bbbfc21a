// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Banter chatbot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Banter configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BanterConfig {
    /// Bot identity and conversation behavior.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Intent classifier and entity extractor settings.
    #[serde(default)]
    pub nlu: NluConfig,

    /// Short-term and long-term memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Web shell settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Bot identity and conversation behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// System instruction placed first in every completion request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Maximum number of history turns sent with a completion request.
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,

    /// Session key used by the terminal shell for the whole process.
    #[serde(default = "default_terminal_session_id")]
    pub terminal_session_id: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: default_system_prompt(),
            history_turns: default_history_turns(),
            terminal_session_id: default_terminal_session_id(),
        }
    }
}

fn default_agent_name() -> String {
    "banter".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_history_turns() -> usize {
    10
}

fn default_terminal_session_id() -> String {
    "test_session".to_string()
}

/// Completion API configuration (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for fallback replies.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature. Omitted from requests when unset.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Base URL of the API (without the `/chat/completions` suffix).
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// HTTP timeout for a single completion request.
    #[serde(default = "default_openai_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: None,
            base_url: default_openai_base_url(),
            timeout_secs: default_openai_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_timeout_secs() -> u64 {
    60
}

/// Which intent classifier to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Local keyword heuristics, no network.
    #[default]
    Keyword,
    /// Hosted zero-shot classification model.
    Hosted,
}

/// Which entity extractor to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// Local pattern rules, no network.
    #[default]
    Rules,
    /// Hosted token-classification model.
    Hosted,
}

/// Intent classifier and entity extractor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NluConfig {
    /// Classifier implementation.
    #[serde(default)]
    pub classifier: ClassifierKind,

    /// Extractor implementation.
    #[serde(default)]
    pub extractor: ExtractorKind,

    /// Base URL of the hosted inference API; the model id is appended.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,

    /// Bearer token for the hosted inference API.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Zero-shot classification model id.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Token-classification (NER) model id.
    #[serde(default = "default_ner_model")]
    pub ner_model: String,

    /// HTTP timeout for hosted model calls.
    #[serde(default = "default_nlu_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::default(),
            extractor: ExtractorKind::default(),
            inference_url: default_inference_url(),
            api_token: None,
            classifier_model: default_classifier_model(),
            ner_model: default_ner_model(),
            timeout_secs: default_nlu_timeout_secs(),
        }
    }
}

fn default_inference_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_classifier_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_ner_model() -> String {
    "dslim/bert-base-NER".to_string()
}

fn default_nlu_timeout_secs() -> u64 {
    30
}

/// Memory system configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Record memory metrics (degraded operations, store latency).
    #[serde(default)]
    pub telemetry: bool,

    /// Short-term (key-value) store settings.
    #[serde(default)]
    pub short_term: ShortTermConfig,

    /// Long-term (document) store settings.
    #[serde(default)]
    pub long_term: LongTermConfig,
}

/// Short-term store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortTermBackend {
    /// Redis server.
    #[default]
    Redis,
    /// Process-local map; contents are lost on exit.
    Memory,
}

/// Short-term store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShortTermConfig {
    /// Backend implementation.
    #[serde(default)]
    pub backend: ShortTermBackend,

    /// Redis host.
    #[serde(default = "default_redis_host")]
    pub host: String,

    /// Redis port.
    #[serde(default = "default_redis_port")]
    pub port: u16,

    /// Redis password, if the server requires one.
    #[serde(default)]
    pub password: Option<String>,

    /// Lifetime of the stored intent.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Upper bound on a single store operation.
    #[serde(default = "default_short_term_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ShortTermConfig {
    fn default() -> Self {
        Self {
            backend: ShortTermBackend::default(),
            host: default_redis_host(),
            port: default_redis_port(),
            password: None,
            ttl_secs: default_ttl_secs(),
            timeout_secs: default_short_term_timeout_secs(),
        }
    }
}

fn default_redis_host() -> String {
    "localhost".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_ttl_secs() -> u64 {
    3600 // 1 hour
}

fn default_short_term_timeout_secs() -> u64 {
    5
}

/// Long-term store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LongTermConfig {
    /// Path of the SQLite file (`:memory:` for a throwaway database).
    #[serde(default = "default_long_term_path")]
    pub path: String,

    /// Collection name; entries of other collections in the same file are invisible.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Maximum number of entries returned for one session.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Upper bound on a single store operation.
    #[serde(default = "default_long_term_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LongTermConfig {
    fn default() -> Self {
        Self {
            path: default_long_term_path(),
            collection: default_collection(),
            max_results: default_max_results(),
            timeout_secs: default_long_term_timeout_secs(),
        }
    }
}

fn default_long_term_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("banter").join("memory.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("memory.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_collection() -> String {
    "memory".to_string()
}

fn default_max_results() -> usize {
    100
}

fn default_long_term_timeout_secs() -> u64 {
    10
}

/// How the web shell identifies a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Issue a token on first contact; the client sends it back.
    #[default]
    Token,
    /// Use the caller's IP address.
    RemoteAddr,
}

/// Web shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Session identity scheme.
    #[serde(default)]
    pub session_mode: SessionMode,

    /// Directory with a custom `index.html`; the built-in page is served when unset.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            session_mode: SessionMode::default(),
            static_dir: None,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    5000
}
