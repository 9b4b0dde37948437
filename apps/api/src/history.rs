//! Match history: pluggable persistence for analysed matches, keyed by user.
//!
//! Default: `PgMatchHistory` when `DATABASE_URL` is set.
//! Fallback: `InMemoryMatchHistory` (lost on restart; also used by tests). Keeps at most
//! `MAX_HISTORY_LIMIT` rows per user, dropping the oldest.
//!
//! `AppState` holds an `Arc<dyn MatchHistoryStore>`, chosen at startup via config.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::match_result::{MatchResultRow, NewMatchRecord};

pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Clamps a requested page size into `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

#[async_trait]
pub trait MatchHistoryStore: Send + Sync {
    async fn save(&self, record: NewMatchRecord) -> Result<MatchResultRow, AppError>;

    /// Most recent matches for a user, newest first.
    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<MatchResultRow>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

pub struct PgMatchHistory {
    pool: PgPool,
}

impl PgMatchHistory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchHistoryStore for PgMatchHistory {
    async fn save(&self, record: NewMatchRecord) -> Result<MatchResultRow, AppError> {
        let row = record.into_row(Uuid::new_v4(), Utc::now());

        let saved = sqlx::query_as::<_, MatchResultRow>(
            r#"
            INSERT INTO match_results
                (id, user_id, resume_file_name, jd_file_name, match_percentage,
                 resume_keywords, jd_keywords, matched_keywords, missing_skills,
                 suggestions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(&row.resume_file_name)
        .bind(&row.jd_file_name)
        .bind(row.match_percentage)
        .bind(&row.resume_keywords)
        .bind(&row.jd_keywords)
        .bind(&row.matched_keywords)
        .bind(&row.missing_skills)
        .bind(&row.suggestions)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved match result {} for user {}", saved.id, saved.user_id);
        Ok(saved)
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<MatchResultRow>, AppError> {
        Ok(sqlx::query_as::<_, MatchResultRow>(
            r#"
            SELECT * FROM match_results
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryMatchHistory {
    rows: RwLock<HashMap<Uuid, Vec<MatchResultRow>>>,
}

impl InMemoryMatchHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchHistoryStore for InMemoryMatchHistory {
    async fn save(&self, record: NewMatchRecord) -> Result<MatchResultRow, AppError> {
        let row = record.into_row(Uuid::new_v4(), Utc::now());
        let mut rows = self.rows.write().await;
        let user_rows = rows.entry(row.user_id).or_default();
        user_rows.push(row.clone());

        let cap = MAX_HISTORY_LIMIT as usize;
        if user_rows.len() > cap {
            let excess = user_rows.len() - cap;
            user_rows.drain(..excess);
        }
        Ok(row)
    }

    async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<MatchResultRow>, AppError> {
        let rows = self.rows.read().await;
        let take = usize::try_from(limit.max(0)).unwrap_or(0);
        // Rows are appended in save order, so newest is last.
        Ok(rows
            .get(&user_id)
            .map(|user_rows| user_rows.iter().rev().take(take).cloned().collect())
            .unwrap_or_default())
    }
}
