//! Message types for the conversation.
//!
//! A [`Message`] is one chat turn. Messages are never edited after creation;
//! the conversation only ever grows by appending new ones.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The simulated companion.
    Assistant,
    /// The person typing.
    User,
}

impl Role {
    /// Display label for the role.
    pub fn label(self) -> &'static str {
        match self {
            Role::Assistant => "assistant",
            Role::User => "user",
        }
    }
}

/// A single chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: String,
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Display timestamp (e.g. `"10:45"` or `"10:45 AM"` for seeded turns).
    pub timestamp: String,
    /// Optional split of the content into separate bubbles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<String>>,
}

impl Message {
    /// Create a user message with a fresh id.
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role: Role::User,
            content: content.into(),
            timestamp: timestamp.into(),
            blocks: None,
        }
    }

    /// Create an assistant message with a fresh id.
    pub fn assistant(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: timestamp.into(),
            blocks: None,
        }
    }

    /// Replace the id (used for seeded data with stable ids).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach bubble blocks.
    #[must_use]
    pub fn with_blocks<I, S>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks = Some(blocks.into_iter().map(Into::into).collect());
        self
    }

    /// The text segments to render, one per bubble.
    ///
    /// Falls back to the full content when the message has no blocks.
    pub fn segments(&self) -> Vec<&str> {
        match &self.blocks {
            Some(blocks) if !blocks.is_empty() => blocks.iter().map(String::as_str).collect(),
            _ => vec![self.content.as_str()],
        }
    }

    /// Whether the message was written by the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// Generate a fresh message id.
pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}
