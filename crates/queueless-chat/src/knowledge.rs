//! Static knowledge base and navigation action table.
//!
//! Both tables are loaded once (from the bundled TOML or a user file),
//! validated, and never mutated afterwards.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::capabilities::{Capabilities, CapabilityError};
use crate::error::ChatError;

const BUNDLED_KNOWLEDGE: &str = include_str!("../data/knowledge.toml");

// =============================================================================
// Entries
// =============================================================================

/// Answer text for a knowledge entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Same text regardless of the conversation.
    Fixed(String),
    /// Text chosen by the topic remembered from the previous exchange.
    Contextual {
        default: String,
        #[serde(default)]
        by_topic: BTreeMap<String, String>,
    },
}

impl Answer {
    /// Resolve the answer against the topic remembered before this match.
    pub fn resolve(&self, last_topic: Option<&str>) -> &str {
        match self {
            Answer::Fixed(text) => text.as_str(),
            Answer::Contextual { default, by_topic } => last_topic
                .and_then(|topic| by_topic.get(topic))
                .map(String::as_str)
                .unwrap_or(default.as_str()),
        }
    }
}

/// A question/answer record in the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    pub intent: String,
    /// Example phrasings of the intent.
    pub questions: Vec<String>,
    /// Regexes that boost confidence when they match the raw input.
    #[serde(default)]
    pub patterns: Vec<String>,
    pub answer: Answer,
}

/// Side effect performed by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionEffect {
    NavigateLogin,
    ScrollTo { section: String },
}

/// A navigation command recognised by pattern alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub id: String,
    pub intent: String,
    #[serde(default)]
    pub questions: Vec<String>,
    pub patterns: Vec<String>,
    pub effect: ActionEffect,
    /// Reply sent once the effect succeeded.
    pub confirmation: String,
}

impl ActionEntry {
    /// Perform the effect through `caps` and return the confirmation text.
    pub fn run(&self, caps: &mut dyn Capabilities) -> Result<&str, CapabilityError> {
        match &self.effect {
            ActionEffect::NavigateLogin => caps.navigate_login()?,
            ActionEffect::ScrollTo { section } => caps.scroll_to(section)?,
        }
        Ok(self.confirmation.as_str())
    }
}

// =============================================================================
// KnowledgeBase
// =============================================================================

/// The complete static configuration of the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Phrasings offered when nothing matched.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Shortcut messages a chat widget can offer as buttons.
    #[serde(default)]
    pub quick_replies: Vec<String>,
    /// Reply per remembered intent, used when a message matches nothing.
    #[serde(default)]
    pub followups: BTreeMap<String, String>,
    pub knowledge: Vec<KnowledgeEntry>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

impl KnowledgeBase {
    /// The knowledge base compiled into the binary.
    pub fn bundled() -> Result<Self, ChatError> {
        Self::from_toml_str(BUNDLED_KNOWLEDGE)
    }

    /// Parse and validate a knowledge base from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ChatError> {
        let kb: KnowledgeBase = toml::from_str(content)?;
        kb.validate()?;
        Ok(kb)
    }

    /// Load and validate a knowledge base from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path).map_err(queueless_core::CoreError::from)?;
        let kb = Self::from_toml_str(&content)?;
        info!(
            "Knowledge base loaded from {} ({} entries, {} actions)",
            path.display(),
            kb.knowledge.len(),
            kb.actions.len()
        );
        Ok(kb)
    }

    /// Look up a knowledge entry by id.
    pub fn entry(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.knowledge.iter().find(|e| e.id == id)
    }

    /// Look up an action by id.
    pub fn action(&self, id: &str) -> Option<&ActionEntry> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Follow-up reply for a remembered intent, if one is configured.
    pub fn followup(&self, intent: &str) -> Option<&str> {
        self.followups.get(intent).map(String::as_str)
    }

    fn validate(&self) -> Result<(), ChatError> {
        if self.knowledge.is_empty() {
            return Err(ChatError::InvalidKnowledge(
                "at least one knowledge entry is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let ids = self
            .knowledge
            .iter()
            .map(|e| (&e.id, &e.intent))
            .chain(self.actions.iter().map(|a| (&a.id, &a.intent)));
        for (id, intent) in ids {
            if id.trim().is_empty() {
                return Err(ChatError::InvalidKnowledge("entry with empty id".to_string()));
            }
            if intent.trim().is_empty() {
                return Err(ChatError::InvalidKnowledge(format!(
                    "entry {} has an empty intent",
                    id
                )));
            }
            if !seen.insert(id.as_str()) {
                return Err(ChatError::InvalidKnowledge(format!("duplicate id: {}", id)));
            }
        }

        if let Some(action) = self.actions.iter().find(|a| a.patterns.is_empty()) {
            return Err(ChatError::InvalidKnowledge(format!(
                "action {} has no patterns",
                action.id
            )));
        }

        Ok(())
    }
}
