//! Tokenizer / keyword extractor: turns raw document text into ranked vocabulary.
//!
//! Tokens are lowercase, punctuation-stripped, length-filtered and stopword-filtered.
//! No stemming. Order is input order.

use std::collections::HashMap;

use serde::Serialize;

/// Common English function words excluded from keyword significance.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "or", "that", "the", "to", "was", "will", "with", "this", "you", "your",
    "we", "they", "them", "these", "those", "have", "do", "does", "did", "been", "being", "very",
    "which", "who", "when", "where",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Stateless tokenizer parameterised by the minimum token length.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    min_token_length: usize,
}

impl Tokenizer {
    pub fn new(min_token_length: usize) -> Self {
        Self { min_token_length }
    }

    /// Lowercases, replaces every non-word, non-whitespace character with a space,
    /// splits on whitespace and drops short tokens and stopwords.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if is_word_char(c) || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        normalized
            .split_whitespace()
            .filter(|token| token.len() >= self.min_token_length && !is_stopword(token))
            .map(str::to_owned)
            .collect()
    }

    /// Counts token frequencies and keeps the `top_n` most frequent.
    ///
    /// Ties keep first-occurrence order (stable sort over insertion order).
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> KeywordSet {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, u32)> = Vec::new();

        for token in self.tokenize(text) {
            match index.get(&token) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(token.clone(), entries.len());
                    entries.push((token, 1));
                }
            }
        }

        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(top_n);

        KeywordSet { entries }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(super::DEFAULT_MIN_TOKEN_LENGTH)
    }
}

/// Word characters match `[A-Za-z0-9_]`; everything else non-blank is punctuation.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Frequency-ranked top-N tokens of one document. Never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordSet {
    entries: Vec<(String, u32)>,
}

impl KeywordSet {
    /// Tokens in rank order (descending frequency).
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }

    pub fn keys(&self) -> Vec<String> {
        self.tokens().map(str::to_owned).collect()
    }

    #[cfg(test)]
    pub fn frequency(&self, token: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, count)| *count)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(2)
    }

    #[test]
    fn test_stopwords_only_yields_nothing() {
        assert!(tokenizer().tokenize("the a is of").is_empty());
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenizer().tokenize("").is_empty());
        assert!(tokenizer().tokenize("   \n\t ").is_empty());
        assert!(tokenizer().extract_keywords("  ", 20).is_empty());
    }

    #[test]
    fn test_punctuation_splits_instead_of_merging() {
        let tokens = tokenizer().tokenize("Node.js, TypeScript/React; CI-CD!");
        assert_eq!(
            tokens,
            vec!["node", "js", "typescript", "react", "ci", "cd"]
        );
    }

    #[test]
    fn test_lowercases_and_keeps_input_order() {
        let tokens = tokenizer().tokenize("Rust GOLANG Python rust");
        assert_eq!(tokens, vec!["rust", "golang", "python", "rust"]);
    }

    #[test]
    fn test_short_tokens_dropped() {
        let tokens = tokenizer().tokenize("C x go R AI");
        assert_eq!(tokens, vec!["go", "ai"]);

        let strict = Tokenizer::new(3).tokenize("go aws sql");
        assert_eq!(strict, vec!["aws", "sql"]);
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        let tokens = tokenizer().tokenize("snake_case ES2015 5+ years");
        assert_eq!(tokens, vec!["snake_case", "es2015", "years"]);
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        let tokens = tokenizer().tokenize("café résumé");
        assert_eq!(tokens, vec!["caf", "sum"]);
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let text = "Senior engineer, React & Node.js; 5 years experience.";
        assert_eq!(tokenizer().tokenize(text), tokenizer().tokenize(text));
    }

    #[test]
    fn test_keywords_ranked_by_frequency() {
        let set = tokenizer().extract_keywords("docker rust rust aws docker rust", 20);
        assert_eq!(set.keys(), vec!["rust", "docker", "aws"]);
        assert_eq!(set.frequency("rust"), Some(3));
        assert_eq!(set.frequency("docker"), Some(2));
        assert_eq!(set.frequency("missing"), None);
    }

    #[test]
    fn test_keyword_ties_keep_first_occurrence_order() {
        let set = tokenizer().extract_keywords("kafka redis kafka redis spark", 20);
        assert_eq!(set.keys(), vec!["kafka", "redis", "spark"]);

        let flat = tokenizer().extract_keywords("zeta alpha mid", 20);
        assert_eq!(flat.keys(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_keywords_truncated_to_top_n() {
        let text = (0..30)
            .map(|i| format!("term{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let set = tokenizer().extract_keywords(&text, 20);
        assert_eq!(set.len(), 20);
        assert!(set.contains("term0"));
        assert!(set.contains("term19"));
        assert!(!set.contains("term20"));
    }

    #[test]
    fn test_fewer_tokens_than_top_n_returns_all() {
        let set = tokenizer().extract_keywords("rust tokio axum", 20);
        assert_eq!(set.len(), 3);
    }
}
