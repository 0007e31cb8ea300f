//! Error types for the support assistant.

use queueless_core::CoreError;

use crate::capabilities::CapabilityError;

/// Errors from loading the knowledge base or answering a message.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid knowledge base: {0}")]
    InvalidKnowledge(String),
    #[error("invalid pattern {pattern:?} in entry {id}: {source}")]
    InvalidPattern {
        id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("capability error: {0}")]
    Capability(#[from] CapabilityError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        ChatError::InvalidKnowledge(err.to_string())
    }
}
