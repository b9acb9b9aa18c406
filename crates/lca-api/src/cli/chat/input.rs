//! Async readline input for the chat loop.
//!
//! Wraps `rustyline_async::Readline`. The prompt switches to a
//! "Listening..." placeholder while voice mode holds the input.

use std::future::Future;

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line (already trimmed).
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Anything the chat loop can read input events from.
pub trait InputSource {
    fn next_event(&mut self) -> impl Future<Output = InputEvent>;
}

/// Async input handler with a normal and a listening prompt.
pub struct ChatInput {
    rl: Readline,
    prompt: String,
    listening_prompt: String,
}

impl ChatInput {
    /// Create the input handler.
    ///
    /// Returns the handler and a `SharedWriter` for printing from background
    /// tasks without corrupting the prompt line.
    pub fn new(prompt: String, listening_prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt.clone())?;
        Ok((
            Self {
                rl,
                prompt,
                listening_prompt,
            },
            writer,
        ))
    }

    /// Switch between the normal and the listening prompt.
    pub fn set_listening(&mut self, listening: bool) {
        let prompt = if listening {
            &self.listening_prompt
        } else {
            &self.prompt
        };
        let _ = self.rl.update_prompt(prompt);
    }

    /// Wait for the next line or control key.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    let _ = self.rl.add_history_entry(trimmed.clone());
                }
                InputEvent::Message(trimmed)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exit.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

impl InputSource for ChatInput {
    fn next_event(&mut self) -> impl Future<Output = InputEvent> {
        self.read_line()
    }
}
