use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;
use crate::sessions::{MemorySessionStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionStore>,
    pub api_limiter: Arc<RateLimiter>,
    pub login_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let rl = &config.rate_limit;
        let api_limiter = Arc::new(RateLimiter::new(
            rl.api_max_requests,
            Duration::from_secs(rl.api_window_secs),
        ));
        let login_limiter = Arc::new(RateLimiter::new(
            rl.login_max_failures,
            Duration::from_secs(rl.login_window_secs),
        ));
        Self {
            db,
            config,
            sessions: Arc::new(MemorySessionStore::new()),
            api_limiter,
            login_limiter,
        }
    }
}
