// Resume ↔ job description matching core.
// Pipeline: raw text → tokens → keyword sets → score + keyword diffs → suggestions.
// Pure and synchronous: no I/O, no shared state. HTTP handlers live in `handlers`.

pub mod handlers;
pub mod profile;
pub mod scorer;
pub mod suggestions;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use scorer::{KeywordMatcher, MatchResult};

pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 2;
pub const DEFAULT_TOP_KEYWORDS: usize = 20;
pub const DEFAULT_MIN_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Matched / missing lists in a `MatchResult` are capped at this many entries.
pub const RESULT_KEYWORD_LIMIT: usize = 20;

pub const DEFAULT_TECHNICAL_TERMS: &[&str] = &[
    "react",
    "nodejs",
    "javascript",
    "typescript",
    "mongodb",
    "postgresql",
    "docker",
    "aws",
    "express",
    "html",
    "css",
];

/// Tunables handed to the matching core. Loaded from the environment by `Config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub min_token_length: usize,
    pub top_keywords: usize,
    pub min_similarity_threshold: f64,
    /// Lowercase terms checked by substring against both raw documents.
    pub technical_terms: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            top_keywords: DEFAULT_TOP_KEYWORDS,
            min_similarity_threshold: DEFAULT_MIN_SIMILARITY_THRESHOLD,
            technical_terms: DEFAULT_TECHNICAL_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Parses a comma-separated term list: trimmed, lowercased, empties dropped.
pub fn parse_term_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = MatchingConfig::default();
        assert_eq!(config.min_token_length, 2);
        assert_eq!(config.top_keywords, 20);
        assert!((config.min_similarity_threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.technical_terms.len(), 11);
        assert!(config.technical_terms.contains(&"postgresql".to_string()));
    }

    #[test]
    fn test_parse_term_list_normalizes() {
        assert_eq!(
            parse_term_list(" Rust, KAFKA ,,grpc ,"),
            vec!["rust", "kafka", "grpc"]
        );
        assert!(parse_term_list("").is_empty());
    }
}
