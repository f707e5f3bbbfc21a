// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `banter memory` command implementation.
//!
//! Opens only the stores, so no API key is needed.

use banter_config::model::BanterConfig;
use banter_core::{BanterError, LongTermEntry, SessionId};
use banter_memory::{MemoryManager, Recall};
use colored::Colorize;

/// Prints the conversation log of one session, or of every session.
pub async fn show(
    config: &BanterConfig,
    session: Option<&str>,
    json: bool,
) -> Result<(), BanterError> {
    let memory = MemoryManager::from_config(&config.memory).await?;
    let session = session.map(SessionId::from);

    let entries = memory.retrieve_long_term(session.as_ref()).await;
    let result = require_fresh(&entries);
    if result.is_ok() {
        for entry in entries.value() {
            if json {
                match serde_json::to_string(entry) {
                    Ok(line) => println!("{line}"),
                    Err(e) => {
                        let err = BanterError::Internal(format!("failed to encode entry: {e}"));
                        return close(&memory, Err(err)).await;
                    }
                }
            } else {
                println!("{}", format_entry(entry, session.is_none()));
            }
        }
        if !json && entries.value().is_empty() {
            println!("{}", "no entries".dimmed());
        }
    }

    close(&memory, result).await
}

/// Clears one session's memory, or every session's log when `session` is `None`.
pub async fn clear(config: &BanterConfig, session: Option<&str>) -> Result<(), BanterError> {
    let memory = MemoryManager::from_config(&config.memory).await?;

    let result = match session {
        Some(id) => {
            let id = SessionId::from(id);
            let short = memory.clear_short_term(&id).await;
            let long = memory.clear_long_term(Some(&id)).await;
            require_fresh(&short).and(require_fresh(&long))
        }
        None => require_fresh(&memory.clear_long_term(None).await),
    };

    if result.is_ok() {
        match session {
            Some(id) => println!("cleared memory for session {}", id.bold()),
            None => println!("cleared the conversation log of every session"),
        }
    }

    close(&memory, result).await
}

/// Releases the stores. The command's own error wins over a shutdown error.
async fn close(
    memory: &MemoryManager,
    result: Result<(), BanterError>,
) -> Result<(), BanterError> {
    let closed = memory.shutdown().await;
    result.and(closed)
}

/// Admin commands treat a degraded store as a failure.
fn require_fresh<T>(recall: &Recall<T>) -> Result<(), BanterError> {
    match recall.reason() {
        None => Ok(()),
        Some(reason) => Err(BanterError::Internal(format!("memory unavailable: {reason}"))),
    }
}

fn format_entry(entry: &LongTermEntry, with_session: bool) -> String {
    let role = format!("{:<9}", entry.role.to_string());
    let prefix = if with_session {
        format!("{} [{}]", entry.timestamp.dimmed(), entry.session_id)
    } else {
        entry.timestamp.dimmed().to_string()
    };
    format!("{prefix} {} {}", role.cyan(), entry.message)
}
