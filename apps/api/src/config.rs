use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::{self, MatchingConfig};

const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "pdf,txt";

/// Application configuration loaded from environment variables.
/// Everything has a default; `DATABASE_URL` switches history to Postgres.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Per-file upload limit in bytes.
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub matching: MatchingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchingConfig::default();
        let technical_terms = match std::env::var("TECHNICAL_TERMS") {
            Ok(raw) => matching::parse_term_list(&raw),
            Err(_) => defaults.technical_terms,
        };

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_file_size: env_or("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE)?,
            allowed_extensions: matching::parse_term_list(
                &std::env::var("ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
            ),
            matching: MatchingConfig {
                min_token_length: env_or("MIN_TOKEN_LENGTH", defaults.min_token_length)?,
                top_keywords: env_or("TOP_KEYWORDS", defaults.top_keywords)?,
                min_similarity_threshold: env_or(
                    "MIN_SIMILARITY_THRESHOLD",
                    defaults.min_similarity_threshold,
                )?,
                technical_terms,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: matching::parse_term_list(DEFAULT_ALLOWED_EXTENSIONS),
            matching: MatchingConfig::default(),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}
