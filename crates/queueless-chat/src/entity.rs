//! Store-name extraction for "how is the queue at X?" questions.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

static STORE_QUEUE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"fila (da|do|no|na)\s+([a-z0-9çãõáéíóúâêôüñ\s]{2,})\??$")
        .case_insensitive(true)
        .build()
        .expect("Invalid store queue regex")
});

/// Extract the establishment named in a queue-status question.
///
/// Matches "... fila do|da|no|na <name>" at the end of the message,
/// with an optional trailing question mark.
pub fn extract_store_name(text: &str) -> Option<String> {
    let caps = STORE_QUEUE.captures(text)?;
    let name = caps.get(2)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_store_with_question_mark() {
        assert_eq!(
            extract_store_name("como está a fila do Mercado Central?").as_deref(),
            Some("Mercado Central")
        );
    }

    #[test]
    fn test_extracts_store_without_question_mark() {
        assert_eq!(
            extract_store_name("tem fila na padaria são joão").as_deref(),
            Some("padaria são joão")
        );
    }

    #[test]
    fn test_all_prepositions() {
        for prep in ["da", "do", "no", "na"] {
            let text = format!("fila {} Loja 24", prep);
            assert_eq!(extract_store_name(&text).as_deref(), Some("Loja 24"));
        }
    }

    #[test]
    fn test_case_insensitive_keyword() {
        assert_eq!(
            extract_store_name("FILA DO BANCO").as_deref(),
            Some("BANCO")
        );
    }

    #[test]
    fn test_requires_end_of_message() {
        // Punctuation other than a final "?" breaks the match
        assert!(extract_store_name("fila do mercado, por favor!").is_none());
    }

    #[test]
    fn test_name_too_short() {
        assert!(extract_store_name("fila do x").is_none());
    }

    #[test]
    fn test_whitespace_only_name() {
        assert!(extract_store_name("fila da   ?").is_none());
    }

    #[test]
    fn test_no_queue_mention() {
        assert!(extract_store_name("como funciona?").is_none());
        assert!(extract_store_name("").is_none());
    }
}
