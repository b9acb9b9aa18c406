//! LCA shopping assistant command-line entry point.
//!
//! Binary name: `lca`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then
//! dispatches to the chat loop or one of the one-shot commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use lca_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_directive};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "lca", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await;

    let result = match cli.command {
        Commands::Chat { login, no_delay } => {
            cli::chat::loop_runner::run_chat_loop(&state, login, no_delay).await
        }

        Commands::Ask {
            message,
            login,
            used,
        } => cli::ask::ask(&state, &message, login, used, cli.json),

        Commands::Rules => cli::rules::list_rules(&state, cli.json),

        Commands::Config { strict } => cli::config::show_config(&state, strict, cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
