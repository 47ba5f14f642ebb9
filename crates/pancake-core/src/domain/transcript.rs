//! Conversation transcript for the AI session.
//!
//! The transcript is an ordered, append-only list of role-tagged turns.
//! The only removal is [`Transcript::discard_last_user`], used when a
//! generation request fails so the failed turn never reaches the provider
//! again.

use std::fmt;

/// Instruction seeded as the first (system) turn of every session.
pub const ASSISTANT_INSTRUCTION: &str = "You are a helpful command-line assistant. \
     Generate only the command and nothing else. \
     If the request is not for a command, respond with helpful text.";

/// Author of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Model,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Ordered list of turns exchanged during one session. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Start a transcript with a single system turn.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            entries: vec![TranscriptEntry::new(Role::System, system_prompt)],
        }
    }

    /// Start a transcript seeded with [`ASSISTANT_INSTRUCTION`].
    pub fn for_assistant() -> Self {
        Self::new(ASSISTANT_INSTRUCTION)
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(Role::User, text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(Role::Model, text));
    }

    /// Drop the trailing turn if, and only if, it is a user turn.
    pub fn discard_last_user(&mut self) -> Option<TranscriptEntry> {
        if self.entries.last().map(|e| e.role) == Some(Role::User) {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text of every system turn, in order.
    pub fn system_texts(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.role == Role::System)
            .map(|e| e.text.as_str())
    }

    /// Render as `role: text` blocks separated by blank lines.
    pub fn flatten(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.role, e.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_system_turn() {
        let transcript = Transcript::for_assistant();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0].role, Role::System);
        assert_eq!(
            transcript.system_texts().collect::<Vec<_>>(),
            vec![ASSISTANT_INSTRUCTION]
        );
    }

    #[test]
    fn discard_only_removes_trailing_user_turn() {
        let mut transcript = Transcript::new("S");
        transcript.push_user("U1");
        transcript.push_model("M1");
        let snapshot = transcript.clone();

        assert!(transcript.discard_last_user().is_none());
        assert_eq!(transcript, snapshot);

        transcript.push_user("U2");
        let dropped = transcript.discard_last_user().unwrap();
        assert_eq!(dropped.text, "U2");
        assert_eq!(transcript, snapshot);
    }

    #[test]
    fn flatten_joins_with_blank_lines() {
        let mut transcript = Transcript::new("S");
        transcript.push_user("list files");
        assert_eq!(transcript.flatten(), "system: S\n\nuser: list files");
    }
}
