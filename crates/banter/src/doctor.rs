// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `banter doctor` command implementation.
//!
//! Runs diagnostic checks against the Banter environment to identify
//! configuration issues and unreachable collaborators.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use banter_config::model::{BanterConfig, ClassifierKind, ExtractorKind};
use banter_core::{BanterError, HealthStatus};
use banter_memory::MemoryManager;
use colored::Colorize;

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: &'static str,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

impl CheckResult {
    fn new(
        name: &'static str,
        status: CheckStatus,
        message: impl Into<String>,
        start: Instant,
    ) -> Self {
        Self {
            name,
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `banter doctor` command.
///
/// Configuration was already loaded and validated by the time this runs.
/// With `plain`, colored output is disabled.
pub async fn run_doctor(config: &BanterConfig, plain: bool) -> Result<(), BanterError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![
        CheckResult::new("Configuration", CheckStatus::Pass, "valid", Instant::now()),
        check_api_key(config),
        check_completion_api(config).await,
        check_nlu(config).await,
    ];
    results.extend(check_memory(config).await);

    println!();
    println!("  banter doctor");
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", render(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    match issues {
        0 => println!("  All checks passed."),
        1 => println!("  1 issue found."),
        n => println!("  {n} issues found."),
    }
    println!();

    Ok(())
}

fn render(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

fn check_api_key(config: &BanterConfig) -> CheckResult {
    let start = Instant::now();
    let configured = config
        .openai
        .api_key
        .as_deref()
        .is_some_and(|k| !k.is_empty())
        || std::env::var(banter_openai::API_KEY_ENV).is_ok_and(|k| !k.is_empty());
    if configured {
        CheckResult::new("API key", CheckStatus::Pass, "configured", start)
    } else {
        CheckResult::new(
            "API key",
            CheckStatus::Fail,
            "missing (set openai.api_key or OPENAI_API_KEY)",
            start,
        )
    }
}

/// Probes a URL; any HTTP answer counts as reachable.
async fn probe(name: &'static str, url: &str) -> CheckResult {
    let start = Instant::now();
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            let message = format!("HTTP client error: {e}");
            return CheckResult::new(name, CheckStatus::Fail, message, start);
        }
    };

    match client.head(url).send().await {
        Ok(_) => CheckResult::new(name, CheckStatus::Pass, format!("reachable ({url})"), start),
        Err(e) if e.is_timeout() => {
            CheckResult::new(name, CheckStatus::Fail, "timeout (5s)", start)
        }
        Err(e) => {
            CheckResult::new(name, CheckStatus::Fail, format!("unreachable: {e}"), start)
        }
    }
}

async fn check_completion_api(config: &BanterConfig) -> CheckResult {
    probe("Completion API", &config.openai.base_url).await
}

async fn check_nlu(config: &BanterConfig) -> CheckResult {
    let hosted = config.nlu.classifier == ClassifierKind::Hosted
        || config.nlu.extractor == ExtractorKind::Hosted;
    if hosted {
        probe("Inference API", &config.nlu.inference_url).await
    } else {
        CheckResult::new(
            "Inference API",
            CheckStatus::Pass,
            "not used (local classifier and extractor)",
            Instant::now(),
        )
    }
}

async fn check_memory(config: &BanterConfig) -> Vec<CheckResult> {
    let start = Instant::now();
    let memory = match MemoryManager::from_config(&config.memory).await {
        Ok(memory) => memory,
        Err(e) => {
            return vec![CheckResult::new(
                "Memory",
                CheckStatus::Fail,
                format!("open failed: {e}"),
                start,
            )];
        }
    };

    let health = memory.health().await;
    let results = vec![
        from_health("Short-term store", &health.short_term, start),
        from_health("Long-term store", &health.long_term, start),
    ];
    let _ = memory.shutdown().await;
    results
}

fn from_health(name: &'static str, status: &HealthStatus, start: Instant) -> CheckResult {
    match status {
        HealthStatus::Healthy => CheckResult::new(name, CheckStatus::Pass, "healthy", start),
        HealthStatus::Degraded(reason) => {
            CheckResult::new(name, CheckStatus::Warn, reason.as_str(), start)
        }
        HealthStatus::Unhealthy(reason) => {
            CheckResult::new(name, CheckStatus::Fail, reason.as_str(), start)
        }
    }
}
