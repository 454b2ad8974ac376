//! Session token store.
//!
//! The authn collaborator: opaque bearer tokens mapped to user ids
//! with a TTL. Injected into [`AppState`](crate::state::AppState)
//! rather than living in process-global state, so a deployment can
//! swap in a shared (e.g. key-value service) implementation.
//!
//! Token issuance from credentials is deliberately not handled here;
//! this store only mints opaque tokens on request, resolves them, and
//! expires them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use sociograph::models::UserId;

/// Key-value session lookup with TTL semantics.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Mint a fresh opaque token for the user.
    async fn issue(&self, user: UserId) -> String;

    /// Resolve a token to its user, if present and not expired.
    async fn resolve(&self, token: &str) -> Option<UserId>;

    /// Drop a token.
    async fn revoke(&self, token: &str);
}

#[derive(Debug, Clone)]
struct Session {
    user: UserId,
    expires_at: DateTime<Utc>,
}

/// In-process session store.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl_hours: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    /// Number of live (possibly expired, not yet reaped) sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn issue(&self, user: UserId) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user,
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    async fn resolve(&self, token: &str) -> Option<UserId> {
        let expired = match self.sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => return Some(session.user),
            Some(_) => true,
            None => false,
        };
        // Expired tokens are reaped lazily on lookup.
        if expired {
            self.sessions.remove(token);
        }
        None
    }

    async fn revoke(&self, token: &str) {
        self.sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issued_tokens_resolve_until_revoked() {
        let store = MemorySessionStore::new(24);
        let token = store.issue(UserId(7)).await;

        assert_eq!(store.resolve(&token).await, Some(UserId(7)));
        assert_eq!(store.resolve("not-a-token").await, None);

        store.revoke(&token).await;
        assert_eq!(store.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn expired_tokens_stop_resolving_and_are_reaped() {
        // Zero TTL: everything is born expired.
        let store = MemorySessionStore::new(0);
        let token = store.issue(UserId(7)).await;

        assert_eq!(store.resolve(&token).await, None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn tokens_are_unique_per_issue() {
        let store = MemorySessionStore::new(24);
        let a = store.issue(UserId(1)).await;
        let b = store.issue(UserId(1)).await;
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
