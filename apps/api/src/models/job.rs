use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub position: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub experience: String,
    pub job_type: String,
    pub level: String,
    pub description: String,
    pub posted_date: DateTime<Utc>,
}

impl Job {
    /// Lower bound of the salary range, e.g. `"20 - 30 LPA"` → 20.
    pub fn base_salary(&self) -> Option<u32> {
        self.salary.split('-').next()?.trim().parse().ok()
    }

    /// City part of `"Pune, India"`.
    pub fn city(&self) -> &str {
        self.location
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(&self.location)
    }
}

/// A catalog job with its score against an uploaded resume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: Job,
    pub match_percentage: u8,
    pub matched_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
}
