use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use time::OffsetDateTime;
use tracing::warn;

use crate::{
    error::ApiError,
    sessions::{Session, SESSION_HEADER},
    state::AppState,
};

/// Resolves the `X-Session-ID` header to a live admin session. Expired
/// entries are evicted on first touch.
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        let session = state
            .sessions
            .get(token)
            .await
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        if session.is_expired(OffsetDateTime::now_utc()) {
            warn!(username = %session.username, "session expired");
            state.sessions.remove(token).await;
            return Err(ApiError::unauthorized("Session expired"));
        }

        Ok(AdminSession(session))
    }
}
