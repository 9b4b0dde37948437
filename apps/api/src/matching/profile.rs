//! Resume profile extraction: best-effort string patterns for contact details and skills.
//!
//! Not part of the scoring contract. Every field falls back to a placeholder or
//! empty value rather than failing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_SKILLS: usize = 15;
const NAME_SCAN_LINES: usize = 5;
const DEFAULT_NAME: &str = "Professional";
const DEFAULT_EXPERIENCE: &str = "1-2 Years";

/// Skill vocabulary matched by substring against the lowercased resume.
const SKILL_VOCABULARY: &[&str] = &[
    "react", "angular", "vue", "nodejs", "node.js", "python", "java", "golang", "csharp", "c#",
    "typescript", "javascript", "mongodb", "mysql", "postgresql", "oracle", "dynamodb", "docker",
    "kubernetes", "aws", "azure", "gcp", "express", "django", "flask", "spring", "graphql",
    "rest", "api", "git", "ci", "cd", "jenkins", "gitlab", "github", "redis", "rabbitmq",
    "kafka", "sql", "nosql", "microservices", "agile", "scrum", "html", "css", "sass",
    "tailwind", "bootstrap", "webpack", "vite", "npm", "yarn", "linux", "windows", "macos",
    "selenium", "testing", "junit", "pytest",
];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+91[-.\s]?)?[0-9]{10}|(\+1[-.\s]?)?[0-9]{3}[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}")
        .expect("valid phone regex")
});

static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(?:years?|yrs?|y)\s+(?:of\s+)?(?:experience|exp)")
        .expect("valid experience regex")
});

static LONG_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4,}").expect("valid digit-run regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: String,
}

pub fn extract_profile(text: &str) -> ResumeProfile {
    ResumeProfile {
        name: extract_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
        skills: extract_skills(text),
        experience: extract_experience(text),
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// First of the leading lines that looks like a 2–4 word name without long numbers.
pub fn extract_name(text: &str) -> String {
    text.lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            let words = line
                .split_whitespace()
                .filter(|w| w.chars().count() > 2)
                .count();
            (2..=4).contains(&words) && !LONG_NUMBER_RE.is_match(line)
        })
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(*skill))
        .take(MAX_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

pub fn extract_experience(text: &str) -> String {
    EXPERIENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|years| format!("{}+ Years", years.as_str()))
        .unwrap_or_else(|| DEFAULT_EXPERIENCE.to_string())
}
