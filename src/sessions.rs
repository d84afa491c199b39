use std::collections::HashMap;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Header carrying the session token on admin requests.
pub const SESSION_HEADER: &str = "x-session-id";

/// An authenticated admin session with an absolute expiry.
#[derive(Debug, Clone)]
pub struct Session {
    pub admin_id: i64,
    pub username: String,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn new(admin_id: i64, username: String, ttl: Duration) -> Self {
        Self {
            admin_id,
            username,
            expires_at: OffsetDateTime::now_utc() + ttl,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Opaque bearer token for a new session.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

/// Narrow interface over session storage so the backing store can be
/// swapped without touching handlers. The bundled implementation is
/// process-local; running multiple replicas requires an external store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: String, session: Session);
    async fn get(&self, token: &str) -> Option<Session>;
    async fn remove(&self, token: &str);
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, token: String, session: Session) {
        self.sessions.write().await.insert(token, session);
    }

    async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }

    async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(ttl_secs: i64) -> Session {
        Session::new(1, "admin".into(), Duration::seconds(ttl_secs))
    }

    #[tokio::test]
    async fn insert_then_get_returns_session() {
        let store = MemorySessionStore::new();
        let token = generate_token();
        store.insert(token.clone(), session(60)).await;

        let found = store.get(&token).await.expect("session present");
        assert_eq!(found.admin_id, 1);
        assert_eq!(found.username, "admin");
    }

    #[tokio::test]
    async fn get_unknown_token_is_none() {
        let store = MemorySessionStore::new();
        assert!(store.get("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemorySessionStore::new();
        let token = generate_token();
        store.insert(token.clone(), session(60)).await;

        store.remove(&token).await;
        assert!(store.get(&token).await.is_none());
        // Removing again must not fail.
        store.remove(&token).await;
    }

    #[test]
    fn expiry_is_absolute() {
        let s = session(3600);
        let now = OffsetDateTime::now_utc();
        assert!(!s.is_expired(now));
        assert!(s.is_expired(now + Duration::hours(2)));
        // Exactly at the boundary counts as expired.
        assert!(s.is_expired(s.expires_at));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
