use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use time::Duration;
use tracing::{info, instrument, warn};

use crate::{
    auth::dto::{LoginRequest, LoginResponse, LogoutResponse},
    auth::password::verify_password,
    auth::repo::AdminUser,
    error::ApiError,
    sessions::{self, Session, SESSION_HEADER},
    state::AppState,
};

/// POST /api/admin/login. Unknown usernames and wrong passwords fail with
/// the same body so callers cannot enumerate accounts. Only failed
/// attempts count against the login budget.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let ip = addr.ip();
    if !state.login_limiter.check(ip) {
        warn!(%ip, "login rate limit exceeded");
        return Err(ApiError::TooManyRequests);
    }

    let user = AdminUser::find_by_username(&state.db, username).await?;
    let verified = match &user {
        Some(user) => verify_password(&payload.password, &user.password_hash)?,
        None => false,
    };
    let Some(user) = user.filter(|_| verified) else {
        state.login_limiter.record(ip);
        warn!(%ip, "invalid login attempt");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    let token = sessions::generate_token();
    let ttl = Duration::hours(state.config.session_ttl_hours);
    state
        .sessions
        .insert(token.clone(), Session::new(user.id, user.username.clone(), ttl))
        .await;

    info!(admin_id = user.id, username = %user.username, "admin logged in");
    Ok(Json(LoginResponse {
        success: true,
        session_id: token,
    }))
}

/// POST /api/admin/logout. Removes the named session if present;
/// idempotent, always reports success.
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<LogoutResponse> {
    if let Some(token) = headers.get(SESSION_HEADER).and_then(|h| h.to_str().ok()) {
        state.sessions.remove(token).await;
        info!("admin logged out");
    }
    Json(LogoutResponse { success: true })
}
