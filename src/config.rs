use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub api_max_requests: u32,
    pub api_window_secs: u64,
    pub login_max_failures: u32,
    pub login_window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub admin: AdminConfig,
    pub session_ttl_hours: i64,
    pub rate_limit: RateLimitConfig,
    /// True unless APP_ENV=production. Gates error detail in 500 bodies.
    pub development: bool,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let admin = AdminConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is not set")?,
        };
        let rate_limit = RateLimitConfig {
            api_max_requests: env_or("RATE_LIMIT_MAX", 100),
            api_window_secs: env_or("RATE_LIMIT_WINDOW_SECS", 15 * 60),
            login_max_failures: env_or("LOGIN_RATE_LIMIT_MAX", 5),
            login_window_secs: env_or("LOGIN_RATE_LIMIT_WINDOW_SECS", 15 * 60),
        };
        Ok(Self {
            database_url,
            admin,
            session_ttl_hours: env_or("SESSION_TTL_HOURS", 24),
            rate_limit,
            development: std::env::var("APP_ENV")
                .map(|v| v != "production")
                .unwrap_or(true),
        })
    }
}
