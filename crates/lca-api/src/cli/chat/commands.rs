//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Anything else is a message for the assistant.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show the conversation so far.
    History,
    /// Toggle voice mode.
    Voice,
    /// Show session mode, remaining questions, and voice state.
    Status,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" | "/close" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/voice" | "/mic" => Some(ChatCommand::Voice),
        "/status" => Some(ChatCommand::Status),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}    {}", style("/help").cyan(), "Show this help message");
    println!("  {}   {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}    {}", style("/exit").cyan(), "Close the chat");
    println!("  {} {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}   {}", style("/voice").cyan(), "Toggle voice mode (listens briefly)");
    println!("  {}  {}", style("/status").cyan(), "Show mode and remaining questions");
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C keeps the chat open").dim()
    );
    println!();
}
