use std::sync::Arc;

use crate::config::Config;
use crate::history::MatchHistoryStore;
use crate::jobs::JobCatalog;
use crate::matching::KeywordMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once from `config.matching`; read-only, shared by every request.
    pub matcher: Arc<KeywordMatcher>,
    /// Pluggable history store. Postgres when DATABASE_URL is set, else in-memory.
    pub history: Arc<dyn MatchHistoryStore>,
    pub jobs: Arc<JobCatalog>,
}

impl AppState {
    pub fn new(config: Config, history: Arc<dyn MatchHistoryStore>, jobs: JobCatalog) -> Self {
        let matcher = Arc::new(KeywordMatcher::new(config.matching.clone()));
        Self {
            config,
            matcher,
            history,
            jobs: Arc::new(jobs),
        }
    }
}
