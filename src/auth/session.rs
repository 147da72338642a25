//! Server-side session store
//!
//! Sessions are keyed by an opaque random token held by the client in a
//! cookie. The store is the only component that maps token -> session. The
//! lifetime is a fixed absolute window set at login; it is not renewed on
//! activity.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Length of the random session token
const TOKEN_LEN: usize = 48;

/// Authenticated session state
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// In-process session store with a fixed absolute TTL
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl_secs` from creation
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Create a session for the given account and return it
    pub async fn create(&self, user_id: i64, username: &str) -> Session {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let session = Session {
            token: token.clone(),
            user_id,
            username: username.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        self.sessions.write().await.insert(token, session.clone());
        session
    }

    /// Look up a session by token. Expired entries are removed on access and
    /// reported as absent; there is no TTL renewal.
    pub async fn get(&self, token: &str) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(s) if !s.is_expired() => return Some(s.clone()),
                None => return None,
                Some(_) => {} // expired, fall through to remove
            }
        }

        self.sessions.write().await.remove(token);
        None
    }

    /// Destroy a session unconditionally. Destroying an absent session is a
    /// successful no-op.
    pub async fn destroy(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Drop all expired sessions. Called opportunistically; correctness does
    /// not depend on it because `get` also drops expired entries.
    pub async fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Number of live (possibly expired but unswept) sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(3600);
        let session = store.create(1, "admin").await;

        assert_eq!(session.token.len(), TOKEN_LEN);
        let found = store.get(&session.token).await.unwrap();
        assert_eq!(found.user_id, 1);
        assert_eq!(found.username, "admin");
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new(3600);
        let a = store.create(1, "admin").await;
        let b = store.create(1, "admin").await;
        assert_ne!(a.token, b.token);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_token_is_anonymous() {
        let store = SessionStore::new(3600);
        assert!(store.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_behaves_as_absent() {
        // Zero TTL: the session is expired the moment it is created.
        let store = SessionStore::new(0);
        let session = store.create(1, "admin").await;

        assert!(store.get(&session.token).await.is_none());
        // The expired entry was dropped on access.
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let store = SessionStore::new(3600);
        let session = store.create(1, "admin").await;

        store.destroy(&session.token).await;
        assert!(store.get(&session.token).await.is_none());

        // Destroying again still succeeds.
        store.destroy(&session.token).await;
    }

    #[tokio::test]
    async fn test_sweep_drops_only_expired() {
        let short = SessionStore::new(0);
        short.create(1, "a").await;
        short.sweep_expired().await;
        assert_eq!(short.len().await, 0);

        let long = SessionStore::new(3600);
        long.create(1, "a").await;
        long.sweep_expired().await;
        assert_eq!(long.len().await, 1);
    }
}
