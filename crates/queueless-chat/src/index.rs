//! Read-only matching index derived from a [`KnowledgeBase`].
//!
//! Question tokens and regexes are prepared once at load time so the
//! knowledge tables themselves stay untouched.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::error::ChatError;
use crate::knowledge::KnowledgeBase;
use crate::normalize::Tokenizer;

/// Precomputed matching data for one knowledge entry or action.
#[derive(Debug, Clone)]
pub struct EntryIndex {
    /// Token set of all example questions joined together.
    pub tokens: HashSet<String>,
    /// Case-insensitive patterns, in table order.
    pub patterns: Vec<Regex>,
}

impl EntryIndex {
    fn build(
        id: &str,
        questions: &[String],
        patterns: &[String],
        tokenizer: &Tokenizer,
    ) -> Result<Self, ChatError> {
        let tokens = tokenizer
            .tokenize(&questions.join(" "))
            .into_iter()
            .collect();
        let patterns = patterns
            .iter()
            .map(|p| compile_pattern(id, p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens, patterns })
    }

    /// Whether any pattern matches the raw input.
    pub fn matches_any(&self, raw: &str) -> bool {
        self.patterns.iter().any(|rx| rx.is_match(raw))
    }

    /// Number of patterns that match the raw input.
    pub fn pattern_hits(&self, raw: &str) -> usize {
        self.patterns.iter().filter(|rx| rx.is_match(raw)).count()
    }
}

fn compile_pattern(id: &str, pattern: &str) -> Result<Regex, ChatError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ChatError::InvalidPattern {
            id: id.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// Index parallel to the knowledge and action tables (same order, same length).
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    knowledge: Vec<EntryIndex>,
    actions: Vec<EntryIndex>,
}

impl KnowledgeIndex {
    /// Build the index, compiling every pattern. Fails on the first bad regex.
    pub fn build(kb: &KnowledgeBase, tokenizer: &Tokenizer) -> Result<Self, ChatError> {
        let knowledge = kb
            .knowledge
            .iter()
            .map(|e| EntryIndex::build(&e.id, &e.questions, &e.patterns, tokenizer))
            .collect::<Result<Vec<_>, _>>()?;
        let actions = kb
            .actions
            .iter()
            .map(|a| EntryIndex::build(&a.id, &a.questions, &a.patterns, tokenizer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { knowledge, actions })
    }

    pub fn knowledge(&self) -> &[EntryIndex] {
        &self.knowledge
    }

    pub fn actions(&self) -> &[EntryIndex] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_index() -> (KnowledgeBase, KnowledgeIndex) {
        let kb = KnowledgeBase::bundled().unwrap();
        let index = KnowledgeIndex::build(&kb, &Tokenizer::default()).unwrap();
        (kb, index)
    }

    #[test]
    fn test_index_parallels_tables() {
        let (kb, index) = bundled_index();
        assert_eq!(index.knowledge().len(), kb.knowledge.len());
        assert_eq!(index.actions().len(), kb.actions.len());
    }

    #[test]
    fn test_question_tokens_are_deduplicated_and_filtered() {
        let (kb, index) = bundled_index();
        let pos = kb.knowledge.iter().position(|e| e.id == "creator").unwrap();
        let tokens = &index.knowledge()[pos].tokens;
        let expected: HashSet<String> = ["quem", "criou", "desenvolveu", "time", "equipe"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tokens, &expected);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let (kb, index) = bundled_index();
        let pos = kb.actions.iter().position(|a| a.id == "go_login").unwrap();
        assert!(index.actions()[pos].matches_any("ENTRAR"));
        assert!(index.actions()[pos].matches_any("quero fazer Login"));
        assert!(!index.actions()[pos].matches_any("reentrarei"));
    }

    #[test]
    fn test_pattern_hits_counts_each_pattern() {
        let (kb, index) = bundled_index();
        let pos = kb.knowledge.iter().position(|e| e.id == "about").unwrap();
        // Both about-patterns match this sentence
        assert_eq!(
            index.knowledge()[pos].pattern_hits("sobre a queueless: o que e queueless"),
            2
        );
        assert_eq!(index.knowledge()[pos].pattern_hits("nada a ver"), 0);
    }

    #[test]
    fn test_invalid_pattern_reports_entry() {
        let content = r#"
[[knowledge]]
id = "broken"
intent = "x"
questions = ["x"]
patterns = ["(unclosed"]
answer = "y"
"#;
        let kb = KnowledgeBase::from_toml_str(content).unwrap();
        let err = KnowledgeIndex::build(&kb, &Tokenizer::default()).unwrap_err();
        match err {
            ChatError::InvalidPattern { id, pattern, .. } => {
                assert_eq!(id, "broken");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_slang_tokenizer_applies_to_questions() {
        let content = r#"
[[knowledge]]
id = "thanks"
intent = "agradecimento"
questions = ["vlw obg"]
answer = "De nada!"
"#;
        let kb = KnowledgeBase::from_toml_str(content).unwrap();
        let index = KnowledgeIndex::build(&kb, &Tokenizer::new(true)).unwrap();
        assert!(index.knowledge()[0].tokens.contains("valeu"));
        assert!(index.knowledge()[0].tokens.contains("obrigado"));
    }
}
