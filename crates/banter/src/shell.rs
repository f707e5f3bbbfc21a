// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `banter shell` command implementation.
//!
//! A line-oriented chat in the terminal. Every line goes through the same
//! orchestrator as the web shell, under one fixed session id.

use banter_config::model::BanterConfig;
use banter_core::{BanterError, ConversationTurn, SessionId};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::error;

use crate::runtime::Runtime;

const EXIT_COMMAND: &str = "exit";

/// Runs the `banter shell` REPL until `exit`, Ctrl+C or Ctrl+D.
pub async fn run_shell(config: BanterConfig, debug_history: bool) -> Result<(), BanterError> {
    let runtime = Runtime::build(&config).await?;
    let session = SessionId::from(config.agent.terminal_session_id.as_str());

    let mut rl = DefaultEditor::new()
        .map_err(|e| BanterError::Internal(format!("failed to initialize readline: {e}")))?;

    println!(
        "{}",
        "Welcome to the Terminal Chatbot. Type 'exit' to quit.".bold().green()
    );

    let prompt = format!("{} ", "You:".cyan());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if is_exit(&line) {
                    break;
                }
                let message = line.trim();
                if message.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match runtime.orchestrator.handle(&session, message).await {
                    Ok(reply) => {
                        if debug_history && !reply.history.is_empty() {
                            println!("{}", format_history(&reply.history).dimmed());
                        }
                        if reply.memory_degraded {
                            eprintln!("{}", "(memory unavailable for this message)".yellow());
                        }
                        println!("{} {}", "Bot:".green().bold(), reply.reply);
                    }
                    Err(e) => {
                        error!(session = %session, error = %e, "failed to handle message");
                        eprintln!("{}: {e}", "error".red());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    runtime.shutdown().await;
    Ok(())
}

/// True for the exit sentinel, compared case-insensitively.
fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

fn format_history(turns: &[ConversationTurn]) -> String {
    let mut out = String::from("Chat History:");
    for turn in turns {
        out.push_str(&format!("\n  {}: {}", turn.role, turn.content));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("  Exit \n"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("quit"));
    }

    #[test]
    fn history_lists_roles_in_order() {
        let turns = vec![
            ConversationTurn::user("hi"),
            ConversationTurn::assistant("Hello! How can I assist you today?"),
        ];
        assert_eq!(
            format_history(&turns),
            "Chat History:\n  user: hi\n  assistant: Hello! How can I assist you today?"
        );
    }
}
