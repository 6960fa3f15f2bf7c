//! Plain-text conversation log used as the upstream prompt.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

pub const USER_PREFIX: &str = "User: ";
pub const ASSISTANT_PREFIX: &str = "Chiku: ";

/// Ordered `User:` / `Chiku:` lines, append-only within a session.
///
/// Lines are only appended for completed turns, so the log never contains a
/// user line without its reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    lines: Vec<String>,
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append one completed turn.
    pub fn push_turn(&mut self, user_text: &str, answer: &str) {
        self.lines.push(user_line(user_text));
        self.lines.push(format!("{ASSISTANT_PREFIX}{answer}"));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The log joined with `\n`.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.lines.join("\n")
    }

    /// The prompt for a new turn: the log plus `User: <text>`, without
    /// mutating the log.
    #[must_use]
    pub fn prompt_with(&self, user_text: &str) -> String {
        let next = user_line(user_text);
        if self.lines.is_empty() {
            next
        } else {
            format!("{}\n{next}", self.serialize())
        }
    }
}

fn user_line(text: &str) -> String {
    format!("{USER_PREFIX}{text}")
}
