//! Support assistant for the QueueLess landing page.
//!
//! Matches free-text questions against a static knowledge base and a table
//! of navigation actions, remembering the last topic for follow-ups.

pub mod capabilities;
pub mod commands;
pub mod context;
pub mod entity;
pub mod error;
pub mod index;
pub mod knowledge;
pub mod normalize;
pub mod responder;
pub mod scorer;

pub use capabilities::{Capabilities, CapabilityError};
pub use commands::Command;
pub use entity::extract_store_name;
pub use error::ChatError;
pub use index::KnowledgeIndex;
pub use knowledge::{ActionEffect, ActionEntry, Answer, KnowledgeBase, KnowledgeEntry};
pub use normalize::{normalize, tokenize, Tokenizer};
pub use responder::{Reply, Resolution, Responder, LOCATION_INTENT};
pub use scorer::{jaccard, ScoredCandidate, Scorer};
