//! Scorer: blends three signals into a bounded match percentage.
//!
//! `match_percentage = round(keyword_ratio·0.4 + jaccard·100·0.4 + technical·0.2)`, clamped to 0–100.
//!
//! - keyword_ratio: share of the JD's top keywords also in the resume's top keywords
//! - jaccard: set overlap over the *full* tokenized text of both documents
//! - technical: share of the checklist terms present (substring) in both raw texts
//!
//! Keyword lists use the top-N sets while Jaccard uses the whole vocabulary.
//! That asymmetry is intentional and must not be unified.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::suggestions::generate_suggestions;
use crate::matching::tokenizer::Tokenizer;
use crate::matching::{MatchingConfig, RESULT_KEYWORD_LIMIT};

const KEYWORD_WEIGHT: f64 = 0.4;
const SIMILARITY_WEIGHT: f64 = 0.4;
const TECHNICAL_WEIGHT: f64 = 0.2;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Result of matching one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_percentage: u8, // 0 – 100
    pub matched_keywords: Vec<String>, // ≤ 20, resume rank order
    pub missing_skills: Vec<String>,   // ≤ 20, JD rank order
    pub suggestions: Vec<String>,
    pub resume_keywords: Vec<String>,
    pub jd_keywords: Vec<String>,
}

/// The three raw signals behind a score. Useful for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub keyword_ratio: f64, // 0 – 100
    pub jaccard: f64,       // 0 – 1
    pub technical: f64,     // 0 – 100
}

impl ScoreBreakdown {
    pub fn match_percentage(&self) -> u8 {
        let blended = self.keyword_ratio * KEYWORD_WEIGHT
            + self.jaccard * 100.0 * SIMILARITY_WEIGHT
            + self.technical * TECHNICAL_WEIGHT;
        blended.round().clamp(0.0, 100.0) as u8
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Pure keyword matcher. Holds only read-only configuration, so a single
/// instance is shared across requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    tokenizer: Tokenizer,
    config: MatchingConfig,
}

impl KeywordMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.min_token_length),
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Jaccard similarity of the de-duplicated token sets. 0 when both are empty.
    pub fn calculate_similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let set_a: HashSet<String> = self.tokenizer.tokenize(text_a).into_iter().collect();
        let set_b: HashSet<String> = self.tokenizer.tokenize(text_b).into_iter().collect();

        let union = set_a.union(&set_b).count();
        if union == 0 {
            return 0.0;
        }
        let intersection = set_a.intersection(&set_b).count();
        intersection as f64 / union as f64
    }

    /// Percentage of checklist terms found (case-insensitive substring) in both texts.
    pub fn technical_score(&self, resume_text: &str, jd_text: &str) -> f64 {
        let terms = &self.config.technical_terms;
        if terms.is_empty() {
            return 0.0;
        }
        let resume_lower = resume_text.to_lowercase();
        let jd_lower = jd_text.to_lowercase();

        let shared = terms
            .iter()
            .filter(|term| resume_lower.contains(term.as_str()) && jd_lower.contains(term.as_str()))
            .count();
        shared as f64 / terms.len() as f64 * 100.0
    }

    /// Scores a resume against a job description. Total over all string inputs.
    pub fn analyze_match(&self, resume_text: &str, jd_text: &str) -> MatchResult {
        let top_n = self.config.top_keywords;
        let resume_keywords = self.tokenizer.extract_keywords(resume_text, top_n).keys();
        let jd_set = self.tokenizer.extract_keywords(jd_text, top_n);
        let jd_keywords = jd_set.keys();

        let resume_lookup: HashSet<&str> = resume_keywords.iter().map(String::as_str).collect();

        let matched_keywords: Vec<String> = resume_keywords
            .iter()
            .filter(|kw| jd_set.contains(kw))
            .cloned()
            .collect();
        let missing_skills: Vec<String> = jd_keywords
            .iter()
            .filter(|kw| !resume_lookup.contains(kw.as_str()))
            .cloned()
            .collect();

        let jaccard = self.calculate_similarity(resume_text, jd_text);

        let keyword_ratio = if jd_set.is_empty() {
            0.0
        } else {
            matched_keywords.len() as f64 / jd_set.len() as f64 * 100.0
        };

        let breakdown = ScoreBreakdown {
            keyword_ratio,
            jaccard,
            technical: self.technical_score(resume_text, jd_text),
        };
        let match_percentage = breakdown.match_percentage();

        debug!(
            keyword_ratio = breakdown.keyword_ratio,
            similarity_percent = breakdown.jaccard * 100.0,
            technical_score = breakdown.technical,
            match_percentage,
            "match calculation"
        );

        let suggestions = generate_suggestions(
            &matched_keywords,
            &missing_skills,
            jaccard,
            self.config.min_similarity_threshold,
        );

        MatchResult {
            match_percentage,
            matched_keywords: truncated(matched_keywords),
            missing_skills: truncated(missing_skills),
            suggestions,
            resume_keywords,
            jd_keywords,
        }
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(MatchingConfig::default())
    }
}

fn truncated(mut keywords: Vec<String>) -> Vec<String> {
    keywords.truncate(RESULT_KEYWORD_LIMIT);
    keywords
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_STACK: &str =
        "React Node.js TypeScript MongoDB Express developer with REST API experience";

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::default()
    }

    #[test]
    fn test_empty_documents_score_zero() {
        let result = matcher().analyze_match("", "");
        assert_eq!(result.match_percentage, 0);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_skills.is_empty());
        assert!(result.resume_keywords.is_empty());
        assert!(result.jd_keywords.is_empty());
        assert!(!result.suggestions.is_empty());
        assert_eq!(matcher().calculate_similarity("", ""), 0.0);
    }

    #[test]
    fn test_identical_documents_score_high() {
        let result = matcher().analyze_match(FULL_STACK, FULL_STACK);
        // keyword ratio 100, jaccard 1.0, technical 4/11 → round(40 + 40 + 7.27)
        assert_eq!(result.match_percentage, 87);
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.matched_keywords, result.resume_keywords);
        assert!(result.suggestions[0].starts_with("Excellent match"));
    }

    #[test]
    fn test_disjoint_documents() {
        let resume = "watercolor painting and landscape photography hobbies";
        let jd = "Java Spring Boot microservices Kubernetes";
        let result = matcher().analyze_match(resume, jd);

        assert!(result.matched_keywords.is_empty());
        assert_eq!(result.missing_skills, result.jd_keywords);
        assert_eq!(result.match_percentage, 0);
        assert!(result.suggestions[0].starts_with("Low match"));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.starts_with("Consider acquiring these key skills: java, spring")));
    }

    #[test]
    fn test_partial_overlap() {
        let resume = "React TypeScript Redux";
        let jd = "React TypeScript Redux Testing Webpack";
        let result = matcher().analyze_match(resume, jd);

        assert_eq!(result.matched_keywords, vec!["react", "typescript", "redux"]);
        assert_eq!(result.missing_skills, vec!["testing", "webpack"]);
        // 60·0.4 + 60·0.4 + (2/11·100)·0.2 = 51.64
        assert_eq!(result.match_percentage, 52);
        assert!(result.match_percentage > 0 && result.match_percentage < 100);
    }

    #[test]
    fn test_matched_keywords_follow_resume_rank() {
        let resume = "docker docker docker kafka kafka rust";
        let jd = "rust kafka docker";
        let result = matcher().analyze_match(resume, jd);
        assert_eq!(result.matched_keywords, vec!["docker", "kafka", "rust"]);
    }

    #[test]
    fn test_subset_and_complement_laws() {
        let resume = "Senior Rust engineer building async services with tokio, axum and PostgreSQL. \
                      Docker, AWS, CI pipelines, observability, tracing.";
        let jd = "We need a backend engineer: Rust, Go, Kubernetes, AWS, PostgreSQL, gRPC, \
                  observability, on-call rotation, Terraform.";
        let result = matcher().analyze_match(resume, jd);

        for kw in &result.matched_keywords {
            assert!(result.resume_keywords.contains(kw));
            assert!(result.jd_keywords.contains(kw));
        }
        for kw in &result.missing_skills {
            assert!(result.jd_keywords.contains(kw));
            assert!(!result.resume_keywords.contains(kw));
        }
    }

    #[test]
    fn test_lists_capped_at_twenty() {
        let resume: String = (0..40).map(|i| format!("shared{i} ")).collect();
        let jd: String = (0..40).map(|i| format!("other{i} ")).collect();
        let config = MatchingConfig {
            top_keywords: 40,
            ..MatchingConfig::default()
        };
        let m = KeywordMatcher::new(config);

        let same = m.analyze_match(&resume, &resume);
        assert_eq!(same.resume_keywords.len(), 40);
        assert_eq!(same.matched_keywords.len(), RESULT_KEYWORD_LIMIT);

        let apart = m.analyze_match(&resume, &jd);
        assert_eq!(apart.missing_skills.len(), RESULT_KEYWORD_LIMIT);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = "Rust tokio axum services";
        let b = "Go services with gRPC and tokio-like runtimes";
        assert_eq!(
            matcher().calculate_similarity(a, b),
            matcher().calculate_similarity(b, a)
        );
    }

    #[test]
    fn test_self_similarity_is_one() {
        assert_eq!(matcher().calculate_similarity(FULL_STACK, FULL_STACK), 1.0);
    }

    #[test]
    fn test_similarity_uses_full_vocabulary() {
        // Shared tokens beyond the top-N sets still count toward Jaccard.
        let config = MatchingConfig {
            top_keywords: 1,
            ..MatchingConfig::default()
        };
        let m = KeywordMatcher::new(config);
        let a = "alpha alpha beta gamma";
        let b = "delta delta beta gamma";
        assert!((m.calculate_similarity(a, b) - 0.5).abs() < 1e-9);

        let result = m.analyze_match(a, b);
        assert_eq!(result.resume_keywords, vec!["alpha"]);
        assert_eq!(result.jd_keywords, vec!["delta"]);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_technical_score_requires_both_documents() {
        let m = matcher();
        let one_term = 100.0 / 11.0;
        assert!((m.technical_score("react docker", "react") - one_term).abs() < 1e-9);
        assert!((m.technical_score("REACT", "I use React daily") - one_term).abs() < 1e-9);
        assert_eq!(m.technical_score("docker", "kubernetes"), 0.0);
    }

    #[test]
    fn test_empty_checklist_scores_zero() {
        let config = MatchingConfig {
            technical_terms: vec![],
            ..MatchingConfig::default()
        };
        let m = KeywordMatcher::new(config);
        assert_eq!(m.technical_score("react", "react"), 0.0);
        // keyword ratio 100 + jaccard 100, no technical component
        assert_eq!(m.analyze_match("react", "react").match_percentage, 80);
    }

    #[test]
    fn test_empty_jd_with_resume_text() {
        let result = matcher().analyze_match(FULL_STACK, "");
        assert_eq!(result.match_percentage, 0);
        assert!(result.jd_keywords.is_empty());
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_analyze_match_is_idempotent() {
        let m = matcher();
        let resume = "Full stack engineer: React, Node.js, PostgreSQL, Docker on AWS.";
        let jd = "Looking for React and Node.js developers familiar with AWS and CSS.";
        assert_eq!(m.analyze_match(resume, jd), m.analyze_match(resume, jd));
    }

    #[test]
    fn test_score_breakdown_is_clamped() {
        let breakdown = ScoreBreakdown {
            keyword_ratio: 500.0,
            jaccard: 5.0,
            technical: 500.0,
        };
        assert_eq!(breakdown.match_percentage(), 100);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = matcher().analyze_match("rust", "rust");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("matchPercentage").is_some());
        assert!(json.get("matchedKeywords").is_some());
        assert!(json.get("missingSkills").is_some());
        assert!(json.get("resumeKeywords").is_some());
        assert!(json.get("jdKeywords").is_some());
    }
}
