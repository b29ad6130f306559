//! Conversation turns and the per-request conversation context.

use serde::{Deserialize, Serialize};

/// One message exchanged in the conversation.
///
/// Turns arrive from the caller in chronological order and are never
/// modified afterwards. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Turn {
    /// Sender role as supplied by the caller (e.g. "scammer", "agent", "user").
    pub sender: String,
    /// Message body, kept verbatim.
    pub text: String,
    /// Caller-supplied timestamp, opaque to the agent.
    pub timestamp: String,
}

impl Turn {
    /// Creates a turn with an empty timestamp.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: String::new(),
        }
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Returns true if this turn was sent by one of the given roles.
    ///
    /// Role comparison ignores ASCII case and surrounding whitespace.
    pub fn is_from_any(&self, roles: &[String]) -> bool {
        let sender = self.sender.trim();
        roles.iter().any(|role| role.eq_ignore_ascii_case(sender))
    }
}

/// Everything the agent knows about a conversation for a single request.
///
/// The caller is the system of record for history; the context lives only
/// for the duration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    session_id: String,
    history: Vec<Turn>,
    current_message: String,
}

impl ConversationContext {
    /// Creates a context from prior turns and the new inbound message.
    pub fn new(
        session_id: impl Into<String>,
        history: Vec<Turn>,
        current_message: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            history,
            current_message: current_message.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Prior turns, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// The message the counterpart just sent.
    pub fn current_message(&self) -> &str {
        &self.current_message
    }

    /// Text of the most recent turn sent by one of `own_roles`, or `""`.
    pub fn last_reply_from(&self, own_roles: &[String]) -> &str {
        self.history
            .iter()
            .rev()
            .find(|turn| turn.is_from_any(own_roles))
            .map(|turn| turn.text.as_str())
            .unwrap_or("")
    }
}
