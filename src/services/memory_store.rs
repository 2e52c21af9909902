//! In-process session store.
//!
//! DESIGN
//! ======
//! Sessions live in a `HashMap` behind a tokio `RwLock`, each with a fixed
//! expiry. Expired entries read as absent. They are pruned when their token
//! is looked up and swept on every `create`, so the map never holds more than
//! the live sessions plus those expired since the last `create`. Contents
//! vanish on restart.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::session::{SessionStore, SessionUser, StoreError, generate_token};

struct Entry {
    user: SessionUser,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, sessions: RwLock::new(HashMap::new()) }
    }

    /// Number of stored sessions, expired ones included until pruned.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn lookup(&self, token: &str) -> Result<Option<SessionUser>, StoreError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.user.clone())),
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions.get(token).is_some_and(|entry| entry.is_expired(now)) {
            sessions.remove(token);
            tracing::debug!("pruned expired session");
        }
        Ok(None)
    }

    async fn create(&self, user: &SessionUser) -> Result<String, StoreError> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(self.ttl)
            .ok_or_else(|| StoreError::Unavailable(format!("session ttl {:?} overflows the clock", self.ttl)))?;

        let token = generate_token();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "swept expired sessions");
        }
        sessions.insert(token.clone(), Entry { user: user.clone(), expires_at });
        Ok(token)
    }

    async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_store_test.rs"]
mod tests;
