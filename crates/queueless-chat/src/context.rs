//! Conversation session lifecycle.
//!
//! Opens sessions with a time-of-day greeting and records each exchange.

use chrono::{Local, Timelike};
use queueless_core::{ChatMessage, ConversationState};

const INTRODUCTION: &str = "Eu sou o assistente da QueueLess. Em que posso ajudar?";

/// Greeting for the given local hour (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Bom dia!"
    } else if hour < 18 {
        "Boa tarde!"
    } else {
        "Boa noite!"
    }
}

/// First bot message of a session opened at `hour`.
pub fn opening_line(hour: u32) -> String {
    format!("{} {}", greeting(hour), INTRODUCTION)
}

/// Start a session whose history opens with the greeting for `hour`.
pub fn start_session_at(hour: u32) -> ConversationState {
    let mut state = ConversationState::new();
    state.push(ChatMessage::bot(opening_line(hour)));
    state
}

/// Start a session greeted according to the local clock.
pub fn start_session() -> ConversationState {
    start_session_at(Local::now().hour())
}

/// Append one user/bot exchange to the history.
pub fn record_exchange(state: &mut ConversationState, user_text: &str, reply: &str) {
    state.push(ChatMessage::user(user_text));
    state.push(ChatMessage::bot(reply));
}
