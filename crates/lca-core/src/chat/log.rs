//! Append-only conversation log.

use lca_types::chat::{ConversationTurn, Speaker};

/// Ordered record of every turn in a session.
///
/// Turns can only be appended. There is no way to edit or remove a turn
/// once it is in the log.
#[derive(Debug, Default, Clone)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return a reference to it.
    pub fn append(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns produced by `speaker`.
    pub fn count_by(&self, speaker: Speaker) -> usize {
        self.turns.iter().filter(|t| t.speaker() == speaker).count()
    }

    /// The most recent `n` turns, oldest first.
    pub fn tail(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }
}
