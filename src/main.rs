mod app;
mod auth;
mod config;
mod contacts;
mod error;
mod rate_limit;
mod sessions;
mod state;
mod studio;
mod validation;

use crate::auth::repo::AdminUser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "kairos_studio=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = state::AppState::init().await?;
    error::set_development(state.config.development);

    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(&state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    let admin = &state.config.admin;
    AdminUser::ensure_seed(&state.db, &admin.username, &admin.password).await?;

    let app = app::build_app(state);
    app::serve(app).await
}
