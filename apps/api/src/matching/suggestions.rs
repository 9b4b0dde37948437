//! Suggestion generator: threshold rules over the scorer's keyword diffs.
//!
//! Emission order is fixed: quality tier, missing skills, low keyword count,
//! domain mismatch. Only the tier message is unconditional.

use serde::{Deserialize, Serialize};

/// Missing skills named in the missing-skills message.
const MISSING_SKILLS_PREVIEW: usize = 5;

/// Fewer matched keywords than this triggers the "add detail" message.
const MIN_MATCHED_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl QualityTier {
    /// Exclusive lower bounds: >80 excellent, >60 good, >40 moderate, else low.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 80.0 {
            QualityTier::Excellent
        } else if ratio > 60.0 {
            QualityTier::Good
        } else if ratio > 40.0 {
            QualityTier::Moderate
        } else {
            QualityTier::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            QualityTier::Excellent => {
                "Excellent match! Your resume aligns well with the job description."
            }
            QualityTier::Good => {
                "Good match! Consider highlighting your relevant experience more prominently."
            }
            QualityTier::Moderate => {
                "Moderate match. Consider developing the missing skills listed below."
            }
            QualityTier::Low => {
                "Low match. Focus on acquiring the key skills mentioned in the job description."
            }
        }
    }
}

/// matched / (matched + missing) × 100, or 0 when both are empty.
pub fn quality_ratio(matched: usize, missing: usize) -> f64 {
    let total = matched + missing;
    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64 * 100.0
}

/// Builds the ordered guidance list for a match.
pub fn generate_suggestions(
    matched_keywords: &[String],
    missing_skills: &[String],
    similarity: f64,
    min_similarity_threshold: f64,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    let ratio = quality_ratio(matched_keywords.len(), missing_skills.len());
    suggestions.push(QualityTier::from_ratio(ratio).message().to_string());

    if !missing_skills.is_empty() {
        let top_missing: Vec<&str> = missing_skills
            .iter()
            .take(MISSING_SKILLS_PREVIEW)
            .map(String::as_str)
            .collect();
        suggestions.push(format!(
            "Consider acquiring these key skills: {}",
            top_missing.join(", ")
        ));
    }

    if matched_keywords.len() < MIN_MATCHED_KEYWORDS {
        suggestions
            .push("Add more technical details and relevant keywords to your resume.".to_string());
    }

    if similarity < min_similarity_threshold {
        suggestions.push(
            "Your experience domain differs from the role. Consider tailoring your resume for this specific position."
                .to_string(),
        );
    }

    suggestions
}
