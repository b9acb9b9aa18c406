//! CLI command definitions for the `lca` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod config;
pub mod rules;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the LCA scripted shopping assistant.
#[derive(Parser)]
#[command(name = "lca", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed log output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Chat as a logged-in user (no demo question limit).
        #[arg(long)]
        login: bool,

        /// Skip the greeting and typing delays.
        #[arg(long)]
        no_delay: bool,
    },

    /// Ask a single question and print the reply.
    Ask {
        /// The question to ask.
        message: String,

        /// Ask as a logged-in user.
        #[arg(long)]
        login: bool,

        /// Demo questions already used in this session (guests only).
        #[arg(long, default_value_t = 0)]
        used: u32,
    },

    /// List the active response rules in priority order.
    Rules,

    /// Show the effective configuration.
    Config {
        /// Fail if config.toml exists but cannot be read or parsed.
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
