//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Guests see a "Demo Mode" badge next to the assistant name.
pub fn print_welcome_banner(name: &str, tagline: &str, demo_mode: bool, rule_count: usize) {
    println!();
    if demo_mode {
        println!(
            "  {} {}  {}",
            style("✦").magenta().bold(),
            style(name).magenta().bold(),
            style(" Demo Mode ").black().on_white()
        );
    } else {
        println!(
            "  {} {}",
            style("✦").magenta().bold(),
            style(name).magenta().bold()
        );
    }
    println!("  {}", style(tagline).dim());
    println!();
    println!(
        "  {}  {}",
        style("Rules:").bold(),
        style(format!("{rule_count} scripted topics")).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
