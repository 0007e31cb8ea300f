//! Intent responder: routes each message through commands, actions,
//! store-name extraction, knowledge scoring, follow-ups and clarification,
//! in that order.

use std::collections::HashSet;

use queueless_core::config::ResponderConfig;
use queueless_core::ConversationState;
use tracing::debug;

use crate::capabilities::Capabilities;
use crate::commands::{Command, COMMAND_PREFIX};
use crate::context;
use crate::entity::extract_store_name;
use crate::error::ChatError;
use crate::index::KnowledgeIndex;
use crate::knowledge::{ActionEntry, KnowledgeBase};
use crate::normalize::Tokenizer;
use crate::scorer::{self, ScoredCandidate, Scorer};

/// Intent remembered after answering a store queue question.
pub const LOCATION_INTENT: &str = "fila_loja";

const CLARIFICATION_PREFIX: &str = "Não tenho certeza se entendi. Você pode reformular?";

/// Which step of the pipeline produced a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Command(Command),
    Action { id: String },
    Location { store: String },
    Knowledge { id: String, score: f32 },
    FollowUp { topic: String },
    Clarification,
}

/// A reply to one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub resolution: Resolution,
}

/// Answers chat messages from a fixed knowledge base.
///
/// Holds only immutable data, so one instance can serve any number of
/// conversations; each conversation brings its own [`ConversationState`].
#[derive(Debug, Clone)]
pub struct Responder {
    kb: KnowledgeBase,
    index: KnowledgeIndex,
    tokenizer: Tokenizer,
    scorer: Scorer,
    config: ResponderConfig,
}

impl Responder {
    /// Build a responder, precomputing the matching index.
    pub fn new(kb: KnowledgeBase, config: ResponderConfig) -> Result<Self, ChatError> {
        let tokenizer = Tokenizer::new(config.expand_slang);
        let index = KnowledgeIndex::build(&kb, &tokenizer)?;
        Ok(Self {
            kb,
            index,
            tokenizer,
            scorer: Scorer::new(config.pattern_bonus),
            config,
        })
    }

    /// Responder over the bundled knowledge base with default tuning.
    pub fn bundled() -> Result<Self, ChatError> {
        Self::new(KnowledgeBase::bundled()?, ResponderConfig::default())
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }

    /// Open a new conversation greeted by the local clock.
    pub fn start_session(&self) -> ConversationState {
        context::start_session()
    }

    /// Answer one message.
    ///
    /// Returns `Ok(None)` for blank input, leaving `state` untouched.
    /// Capability failures propagate and also leave `state` untouched.
    pub fn respond(
        &self,
        raw_input: &str,
        state: &mut ConversationState,
        caps: &mut dyn Capabilities,
    ) -> Result<Option<Reply>, ChatError> {
        let text = raw_input.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if text.chars().count() > self.config.max_message_chars {
            return Err(ChatError::MessageTooLong(self.config.max_message_chars));
        }

        if text.starts_with(COMMAND_PREFIX) {
            if let Some(command) = Command::parse(text) {
                let reply = command.execute(state, caps)?;
                return Ok(Some(Reply {
                    text: reply,
                    resolution: Resolution::Command(command),
                }));
            }
        }

        let reply = self.resolve(text, state, caps)?;
        context::record_exchange(state, text, &reply.text);
        Ok(Some(reply))
    }

    /// Score every knowledge entry against `text`, in table order.
    pub fn rank(&self, text: &str) -> Vec<ScoredCandidate<'_>> {
        let tokens: HashSet<String> = self.tokenizer.tokenize(text).into_iter().collect();
        self.scorer.rank(text, &tokens, &self.kb, &self.index)
    }

    /// Fallback message listing the suggested phrasings.
    pub fn clarification(&self) -> String {
        format!(
            "{}\n\nExemplos: {}",
            CLARIFICATION_PREFIX,
            self.kb.suggestions.join(" · ")
        )
    }

    fn resolve(
        &self,
        text: &str,
        state: &mut ConversationState,
        caps: &mut dyn Capabilities,
    ) -> Result<Reply, ChatError> {
        if let Some(action) = self.match_action(text) {
            let confirmation = action.run(caps)?.to_string();
            state.set_last_topic(&action.intent);
            debug!(action = %action.id, "Dispatched navigation action");
            return Ok(Reply {
                text: confirmation,
                resolution: Resolution::Action {
                    id: action.id.clone(),
                },
            });
        }

        if let Some(store) = extract_store_name(text) {
            state.set_last_topic(LOCATION_INTENT);
            debug!(%store, "Store queue question");
            return Ok(Reply {
                text: location_reply(&store),
                resolution: Resolution::Location { store },
            });
        }

        let ranked = self.rank(text);
        if let Some(top) = scorer::best(&ranked) {
            if top.score >= self.config.confidence_threshold {
                let answer = top.entry.answer.resolve(state.last_topic()).to_string();
                state.set_last_topic(&top.entry.intent);
                debug!(entry = %top.entry.id, score = top.score, "Knowledge match");
                return Ok(Reply {
                    text: answer,
                    resolution: Resolution::Knowledge {
                        id: top.entry.id.clone(),
                        score: top.score,
                    },
                });
            }
            debug!(
                entry = %top.entry.id,
                score = top.score,
                threshold = self.config.confidence_threshold,
                "Best knowledge match below threshold"
            );
        }

        if let Some(topic) = state.last_topic() {
            if let Some(followup) = self.kb.followup(topic) {
                debug!(%topic, "Answering from follow-up memory");
                return Ok(Reply {
                    text: followup.to_string(),
                    resolution: Resolution::FollowUp {
                        topic: topic.to_string(),
                    },
                });
            }
        }

        debug!("No confident match, asking for clarification");
        Ok(Reply {
            text: self.clarification(),
            resolution: Resolution::Clarification,
        })
    }

    fn match_action(&self, text: &str) -> Option<&ActionEntry> {
        self.kb
            .actions
            .iter()
            .zip(self.index.actions())
            .find(|(_, indexed)| indexed.matches_any(text))
            .map(|(action, _)| action)
    }
}

fn location_reply(store: &str) -> String {
    format!(
        "Ainda não posso medir a fila de \"{}\" diretamente pelo chat. \
         Abra o app, pesquise a loja no mapa e veja o status em tempo real. ",
        store
    )
}
