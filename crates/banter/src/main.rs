// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Banter - a small conversational chatbot with session memory.
//!
//! This is the binary entry point: the web shell, the terminal shell and a
//! few memory administration commands.

mod doctor;
mod memory_cmd;
mod runtime;
mod serve;
mod shell;

use std::path::PathBuf;

use banter_config::model::BanterConfig;
use clap::{Parser, Subcommand};

/// Banter - a small conversational chatbot with session memory.
#[derive(Parser, Debug)]
#[command(name = "banter", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web shell.
    Serve,
    /// Chat in the terminal.
    Shell {
        /// Print the history handed to the completion API.
        #[arg(long)]
        debug_history: bool,
    },
    /// Inspect or clear stored conversation memory.
    Memory {
        #[command(subcommand)]
        action: MemoryCommands,
    },
    /// Check configuration and connectivity.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MemoryCommands {
    /// Print a session's conversation log (every session when omitted).
    Show {
        /// Session to show.
        session: Option<String>,
        /// Print entries as JSON lines.
        #[arg(long)]
        json: bool,
    },
    /// Clear a session's short-term and long-term memory.
    Clear {
        /// Session to clear.
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        session: Option<String>,
        /// Clear the long-term log of every session.
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => banter_config::load_and_validate_path(path),
        None => banter_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            banter_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    if let Err(e) = run(cli.command, config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(
    command: Option<Commands>,
    config: BanterConfig,
) -> Result<(), banter_core::BanterError> {
    match command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell { debug_history }) => shell::run_shell(config, debug_history).await,
        Some(Commands::Memory { action }) => match action {
            MemoryCommands::Show { session, json } => {
                memory_cmd::show(&config, session.as_deref(), json).await
            }
            MemoryCommands::Clear { session, all } => {
                let session = if all { None } else { session.as_deref() };
                memory_cmd::clear(&config, session).await
            }
        },
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        None => {
            println!("banter: use --help for available commands");
            Ok(())
        }
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides `log_level`.
///
/// Logs go to stderr so they do not interleave with shell output on stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    // Target matching is by prefix, so `banter` also covers every `banter_*` crate.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("banter={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
