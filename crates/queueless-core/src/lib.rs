pub mod config;
pub mod error;
pub mod types;

pub use config::QueuelessConfig;
pub use error::{CoreError, Result};
pub use types::{transcript_json, ChatMessage, ConversationState, Sender};
