//! Text normalization and tokenization.
//!
//! Turns raw chat input into comparable tokens: lower-cased, accent-free,
//! URL-free, punctuation-free, with Portuguese function words removed.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// =============================================================================
// Fixed vocabularies
// =============================================================================

/// Closed list of short function words ignored when matching.
const STOPWORD_LIST: &[&str] = &[
    "a", "o", "os", "as", "um", "uma", "de", "da", "do", "das", "dos", "e", "ou", "em", "no", "na",
    "nos", "nas", "para", "pra", "por", "com", "sem", "se", "que", "qual", "quais", "sobre", "ao",
    "aos", "à", "às", "é", "tem", "daqui", "ali", "aqui",
];

/// Chat shorthand and the word it stands for.
const SLANG_LIST: &[(&str, &str)] = &[
    ("vlw", "valeu"),
    ("obg", "obrigado"),
    ("vc", "voce"),
    ("q", "que"),
    ("pq", "porque"),
    ("kkk", "rs"),
    ("kk", "rs"),
];

/// Accented letters kept by the punctuation filter alongside `[a-z0-9]`.
const ACCENTED_ALLOWLIST: &str = "çãõáéíóúâêôüñ";

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid URL regex"));

// Stored normalized so accented entries ("é", "à") compare against tokens.
static STOPWORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| STOPWORD_LIST.iter().map(|w| normalize(w)).collect());

static SLANG: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SLANG_LIST.iter().copied().collect());

// =============================================================================
// Normalization
// =============================================================================

/// Normalize raw text for comparison.
///
/// Lower-cases, strips diacritics (U+0300..U+036F after NFD), removes URLs,
/// replaces anything outside the letter/digit allowlist with a space, then
/// collapses whitespace and trims. Idempotent.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    let without_urls = URL.replace_all(&stripped, "");

    let cleaned: String = without_urls
        .chars()
        .map(|c| {
            if is_allowed(c) || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ACCENTED_ALLOWLIST.contains(c)
}

/// Whether `token` (already normalized) is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Splits normalized text into matching tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    expand_slang: bool,
}

impl Tokenizer {
    pub fn new(expand_slang: bool) -> Self {
        Self { expand_slang }
    }

    /// Tokenize `text`, preserving order. Never fails; may return nothing.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(|t| self.expand(t))
            .filter(|t| !is_stopword(t))
            .map(str::to_string)
            .collect()
    }

    fn expand<'a>(&self, token: &'a str) -> &'a str {
        if !self.expand_slang {
            return token;
        }
        SLANG.get(token).copied().unwrap_or(token)
    }
}

/// Tokenize with the default settings (no slang expansion).
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}
