//! Side effects the assistant can ask its host to perform.
//!
//! The responder never touches a display surface or the filesystem itself;
//! navigation, scrolling and transcript export go through [`Capabilities`].

use queueless_core::ChatMessage;

/// Failure reported by a host capability.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("transcript export failed: {0}")]
    Export(String),
}

/// Host-provided actions, injected into every responder call.
pub trait Capabilities {
    /// Send the user to the login screen.
    fn navigate_login(&mut self) -> Result<(), CapabilityError>;

    /// Bring the named page section (e.g. `#suporte`) into view.
    fn scroll_to(&mut self, section: &str) -> Result<(), CapabilityError>;

    /// Persist or download the conversation transcript.
    fn export_transcript(&mut self, messages: &[ChatMessage]) -> Result<(), CapabilityError>;
}
