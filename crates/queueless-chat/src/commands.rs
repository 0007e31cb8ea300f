//! Slash commands handled ahead of any matching.

use queueless_core::{ChatMessage, ConversationState};
use tracing::debug;

use crate::capabilities::Capabilities;
use crate::error::ChatError;

/// Prefix shared by all chat commands.
pub const COMMAND_PREFIX: char = '/';

const CLEARED_REPLY: &str = "Histórico limpo. Como posso ajudar?";
const EXPORTED_REPLY: &str = "Exportei a conversa como JSON.";

/// A recognised chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/limpar`: wipe the message history.
    Clear,
    /// `/exportar`: hand the transcript to the host for download.
    Export,
}

impl Command {
    /// Parse a trimmed message. Unknown `/words` are not commands.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/limpar" => Some(Command::Clear),
            "/exportar" => Some(Command::Export),
            _ => None,
        }
    }

    /// Run the command and return the bot reply it leaves in the history.
    ///
    /// The remembered topic is never touched.
    pub fn execute(
        self,
        state: &mut ConversationState,
        caps: &mut dyn Capabilities,
    ) -> Result<String, ChatError> {
        debug!(command = ?self, "Executing chat command");
        let reply = match self {
            Command::Clear => {
                state.clear_history();
                CLEARED_REPLY
            }
            Command::Export => {
                caps.export_transcript(&state.messages)?;
                EXPORTED_REPLY
            }
        };
        state.push(ChatMessage::bot(reply));
        Ok(reply.to_string())
    }
}
