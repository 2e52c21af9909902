//! Session lookup contract.
//!
//! ARCHITECTURE
//! ============
//! The surrounding application owns login and registration; this service only
//! reads the session a cookie token points at. `SessionStore` abstracts where
//! that lookup happens so handlers work the same against Postgres and the
//! in-process store used for development and tests.

use std::fmt::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::nav::AuthState;

/// Random bytes per session token; the token is their lowercase hex form.
pub const TOKEN_BYTES: usize = 32;

/// Generate a fresh session token for a cookie value.
#[must_use]
pub fn generate_token() -> String {
    let mut raw = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut raw);
    raw.iter().fold(String::with_capacity(TOKEN_BYTES * 2), |mut token, b| {
        let _ = write!(token, "{b:02x}");
        token
    })
}

// =============================================================================
// TYPES
// =============================================================================

/// User a session token resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Identifier used in the profile link.
    pub user_id: String,
    /// Display name.
    pub name: String,
}

impl SessionUser {
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        AuthState::logged_in(self.user_id.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// SESSION STORE TRAIT
// =============================================================================

/// Backend that resolves session tokens. Enables swapping stores in tests.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a token to its user. Unknown and expired tokens yield `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be queried.
    async fn lookup(&self, token: &str) -> Result<Option<SessionUser>, StoreError>;

    /// Create a session for `user`, returning its token.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the session cannot be persisted.
    async fn create(&self, user: &SessionUser) -> Result<String, StoreError>;

    /// Drop a session. Unknown tokens are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be updated.
    async fn revoke(&self, token: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
