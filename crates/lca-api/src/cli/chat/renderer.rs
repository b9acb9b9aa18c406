//! Terminal rendering for chat turns, notices, and the demo footer.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use lca_types::chat::{ConversationTurn, Speaker};

/// Maximum characters of a turn shown by `/history`.
const HISTORY_PREVIEW_CHARS: usize = 100;

/// Prints assistant output with the assistant's name as the speaker label.
pub struct ChatRenderer {
    assistant_name: String,
}

impl ChatRenderer {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    /// Print one assistant reply.
    pub fn print_assistant(&self, text: &str) {
        println!();
        println!(
            "  {} {}",
            style(&self.assistant_name).cyan().bold(),
            text
        );
        println!();
    }

    /// Print the guest-limit message, styled as a warning.
    pub fn print_limit(&self, text: &str) {
        println!();
        println!(
            "  {} {}",
            style(&self.assistant_name).cyan().bold(),
            style(text).yellow()
        );
        println!();
    }

    /// Print a dim one-line notice from the client itself (not the assistant).
    pub fn print_notice(&self, marker: &str, text: &str) {
        println!("\n  {} {}\n", style(marker).yellow().bold(), style(text).dim());
    }

    /// Print the guest footer shown under each reply.
    pub fn print_demo_footer(&self, remaining: u32) {
        println!("  {}", style(demo_footer(remaining)).dim());
        println!();
    }

    /// Print recent turns, one line each.
    ///
    /// `total` is the full log length, used to note how many earlier turns
    /// were left out.
    pub fn print_history(&self, turns: &[ConversationTurn], total: usize) {
        println!();
        if turns.is_empty() {
            println!("  {}", style("No messages yet.").dim());
        }
        if let Some(note) = earlier_note(turns.len(), total) {
            println!("  {}", style(note).dim());
        }
        for turn in turns {
            let label = match turn.speaker() {
                Speaker::User => format!("{}", style("You").green().bold()),
                Speaker::Assistant => format!("{}", style(&self.assistant_name).cyan().bold()),
            };
            println!(
                "  {} {} {}",
                style(turn.created_at().format("%H:%M:%S")).dim(),
                label,
                preview(turn.text(), HISTORY_PREVIEW_CHARS)
            );
        }
        println!();
    }
}

/// Spinner shown while the assistant is "typing".
pub fn typing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(spinner_style);
    spinner.set_message("typing...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn demo_footer(remaining: u32) -> String {
    let noun = if remaining == 1 { "question" } else { "questions" };
    format!("Demo: {remaining} {noun} remaining \u{00b7} Log in for full features")
}

fn earlier_note(shown: usize, total: usize) -> Option<String> {
    match total.saturating_sub(shown) {
        0 => None,
        1 => Some("(1 earlier message)".to_string()),
        n => Some(format!("({n} earlier messages)")),
    }
}

/// Shorten `text` to at most `max_chars` characters, marking the cut.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
