//! Message domain types.
//!
//! Messages are what the inference router sends to a backend: an optional
//! system instruction, a bounded window of prior turns, and the current user
//! message. The reasoning loop itself works on a flat text transcript and only
//! turns it into a message when it calls the router.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System instructions (persona, rules, mode)
    System,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }

    /// Rough token estimate (4 chars ≈ 1 token).
    pub fn estimated_tokens(&self) -> usize {
        self.content.len() / 4
    }
}

/// Keep only the most recent `max` messages of a history window.
pub fn recent_window(history: &[Message], max: usize) -> &[Message] {
    let start = history.len().saturating_sub(max);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Hello, Jarvis!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello, Jarvis!");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::system("Be concise");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"system\""));
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Be concise");
        assert_eq!(deserialized.role, Role::System);
    }

    #[test]
    fn recent_window_keeps_tail() {
        let history: Vec<Message> = (0..15).map(|i| Message::user(format!("m{i}"))).collect();
        let window = recent_window(&history, 10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "m5");
        assert_eq!(window[9].content, "m14");
    }

    #[test]
    fn recent_window_shorter_than_max() {
        let history = vec![Message::user("only")];
        assert_eq!(recent_window(&history, 10).len(), 1);
    }
}
