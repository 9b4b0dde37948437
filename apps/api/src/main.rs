mod config;
mod db;
mod errors;
mod extraction;
mod history;
mod jobs;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::history::{InMemoryMatchHistory, MatchHistoryStore, PgMatchHistory};
use crate::jobs::JobCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Matching config: min_token_length={} top_keywords={} min_similarity={} technical_terms={}",
        config.matching.min_token_length,
        config.matching.top_keywords,
        config.matching.min_similarity_threshold,
        config.matching.technical_terms.len()
    );

    // Match history: Postgres when configured, otherwise process memory
    let history: Arc<dyn MatchHistoryStore> = match &config.database_url {
        Some(url) => Arc::new(PgMatchHistory::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; match history is kept in memory only");
            Arc::new(InMemoryMatchHistory::new())
        }
    };

    let jobs = JobCatalog::sample();
    info!("Job catalog loaded: {} postings", jobs.all().len());

    let state = AppState::new(config.clone(), history, jobs);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins via a CORS_ORIGIN setting

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
