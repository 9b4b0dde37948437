use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::MatchResult;

/// A persisted match, as stored in `match_results`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchResultRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_file_name: String,
    pub jd_file_name: String,
    pub match_percentage: i32,
    pub resume_keywords: Vec<String>,
    pub jd_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for saving a match to history.
#[derive(Debug, Clone)]
pub struct NewMatchRecord {
    pub user_id: Uuid,
    pub resume_file_name: String,
    pub jd_file_name: String,
    pub result: MatchResult,
}

impl NewMatchRecord {
    pub fn into_row(self, id: Uuid, created_at: DateTime<Utc>) -> MatchResultRow {
        let NewMatchRecord {
            user_id,
            resume_file_name,
            jd_file_name,
            result,
        } = self;
        MatchResultRow {
            id,
            user_id,
            resume_file_name,
            jd_file_name,
            match_percentage: i32::from(result.match_percentage),
            resume_keywords: result.resume_keywords,
            jd_keywords: result.jd_keywords,
            matched_keywords: result.matched_keywords,
            missing_skills: result.missing_skills,
            suggestions: result.suggestions,
            created_at,
        }
    }
}
