use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who wrote a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person talking to the assistant.
    User,
    /// The assistant itself.
    Bot,
}

// =============================================================================
// Structs
// =============================================================================

/// A single message in a conversation transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Local wall-clock time, serialized as RFC 3339 with the UTC offset.
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            sent_at: Local::now(),
        }
    }
}

/// Per-conversation state owned by exactly one chat session.
///
/// `last_topic` holds the intent of the most recent confident match or
/// executed action. It is never set to an intent that failed to match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationState {
    pub id: Uuid,
    pub started_at: DateTime<Local>,
    pub messages: Vec<ChatMessage>,
    last_topic: Option<String>,
}

impl ConversationState {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            messages: Vec::new(),
            last_topic: None,
        }
    }

    /// Intent label remembered from the previous successful exchange.
    pub fn last_topic(&self) -> Option<&str> {
        self.last_topic.as_deref()
    }

    /// Remember `intent` as the current topic.
    pub fn set_last_topic(&mut self, intent: &str) {
        self.last_topic = Some(intent.to_string());
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Drop the message history. The remembered topic survives.
    pub fn clear_history(&mut self) {
        self.messages.clear();
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a transcript as pretty-printed JSON.
pub fn transcript_json(messages: &[ChatMessage]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}
