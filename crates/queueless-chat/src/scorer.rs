//! Similarity scoring between user input and knowledge entries.

use std::collections::HashSet;
use std::hash::Hash;

use crate::index::{EntryIndex, KnowledgeIndex};
use crate::knowledge::{KnowledgeBase, KnowledgeEntry};

/// Jaccard similarity of two sets. Two empty sets score 0.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f32 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// A knowledge entry paired with its score for the current message.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a KnowledgeEntry,
    /// In `[0, 1]`.
    pub score: f32,
}

/// Scores messages against entries: token overlap plus a per-pattern bonus.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    pattern_bonus: f32,
}

impl Scorer {
    pub fn new(pattern_bonus: f32) -> Self {
        Self { pattern_bonus }
    }

    /// Score one entry. `raw` is the unnormalized message, `tokens` its token set.
    pub fn score(&self, raw: &str, tokens: &HashSet<String>, entry: &EntryIndex) -> f32 {
        let base = jaccard(tokens, &entry.tokens);
        let bonus = entry.pattern_hits(raw) as f32 * self.pattern_bonus;
        (base + bonus).min(1.0)
    }

    /// Score every knowledge entry, in table order.
    pub fn rank<'a>(
        &self,
        raw: &str,
        tokens: &HashSet<String>,
        kb: &'a KnowledgeBase,
        index: &KnowledgeIndex,
    ) -> Vec<ScoredCandidate<'a>> {
        kb.knowledge
            .iter()
            .zip(index.knowledge())
            .map(|(entry, indexed)| ScoredCandidate {
                entry,
                score: self.score(raw, tokens, indexed),
            })
            .collect()
    }
}

/// Highest-scoring candidate; the earliest one wins a tie.
pub fn best<'a>(candidates: &[ScoredCandidate<'a>]) -> Option<ScoredCandidate<'a>> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(*candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{tokenize, Tokenizer};

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    // ---- jaccard ----

    #[test]
    fn test_jaccard_basic() {
        let a = set(&["fila", "tempo", "real"]);
        let b = set(&["tempo", "real", "loja"]);
        assert!((jaccard(&a, &b) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_jaccard_is_symmetric() {
        let pairs = [
            (set(&["a1", "b2"]), set(&["b2", "c3", "d4"])),
            (set(&["preco"]), set(&["gratis", "custo", "preco", "valor", "planos"])),
            (set(&[]), set(&["x"])),
        ];
        for (a, b) in pairs {
            assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
        }
    }

    #[test]
    fn test_jaccard_self_similarity_is_one() {
        let a: HashSet<String> = tokenize("Como está a fila do Mercado Central?")
            .into_iter()
            .collect();
        assert!(!a.is_empty());
        assert!((jaccard(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_jaccard_both_empty_is_zero() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn test_jaccard_disjoint_is_zero() {
        assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
    }

    // ---- Scorer ----

    fn bundled() -> (KnowledgeBase, KnowledgeIndex) {
        let kb = KnowledgeBase::bundled().unwrap();
        let index = KnowledgeIndex::build(&kb, &Tokenizer::default()).unwrap();
        (kb, index)
    }

    fn score_of(raw: &str, id: &str) -> f32 {
        let (kb, index) = bundled();
        let tokens: HashSet<String> = tokenize(raw).into_iter().collect();
        let scorer = Scorer::new(0.2);
        scorer
            .rank(raw, &tokens, &kb, &index)
            .into_iter()
            .find(|c| c.entry.id == id)
            .unwrap()
            .score
    }

    #[test]
    fn test_pattern_bonus_added() {
        // {lgpd} vs 5 privacy tokens = 0.2, plus one pattern hit
        assert!((score_of("lgpd", "privacy") - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_pattern_bonus_uses_raw_text() {
        // The raw pattern "preco" does not match the accented form
        assert!((score_of("preço", "price") - 0.2).abs() < 1e-6);
        assert!((score_of("preco", "price") - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_score_is_clamped() {
        let (kb, index) = bundled();
        let scorer = Scorer::new(0.9);
        let raw = "privacidade dados lgpd seguranca coleta";
        let tokens: HashSet<String> = tokenize(raw).into_iter().collect();
        let ranked = scorer.rank(raw, &tokens, &kb, &index);
        let privacy = ranked.iter().find(|c| c.entry.id == "privacy").unwrap();
        assert_eq!(privacy.score, 1.0);
    }

    #[test]
    fn test_rank_keeps_table_order() {
        let (kb, index) = bundled();
        let ranked = Scorer::new(0.2).rank("x", &HashSet::new(), &kb, &index);
        let ids: Vec<&str> = ranked.iter().map(|c| c.entry.id.as_str()).collect();
        let expected: Vec<&str> = kb.knowledge.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_empty_input_scores_zero_without_patterns() {
        assert_eq!(score_of("", "creator"), 0.0);
    }

    // ---- best ----

    #[test]
    fn test_best_prefers_first_on_tie() {
        let (kb, _) = bundled();
        let candidates = vec![
            ScoredCandidate { entry: &kb.knowledge[0], score: 0.5 },
            ScoredCandidate { entry: &kb.knowledge[1], score: 0.5 },
            ScoredCandidate { entry: &kb.knowledge[2], score: 0.1 },
        ];
        assert_eq!(best(&candidates).unwrap().entry.id, kb.knowledge[0].id);
    }

    #[test]
    fn test_best_picks_maximum() {
        let (kb, _) = bundled();
        let candidates = vec![
            ScoredCandidate { entry: &kb.knowledge[0], score: 0.1 },
            ScoredCandidate { entry: &kb.knowledge[1], score: 0.7 },
            ScoredCandidate { entry: &kb.knowledge[2], score: 0.3 },
        ];
        assert_eq!(best(&candidates).unwrap().entry.id, kb.knowledge[1].id);
    }

    #[test]
    fn test_best_of_nothing() {
        assert!(best(&[]).is_none());
    }
}
