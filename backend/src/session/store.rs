//! Driven port for session-token persistence.
//!
//! The session manager holds the caller identity in memory; the token
//! backing it lives behind this port so rehydration (`check_session`) can
//! survive whatever storage the deployment wires in. The default adapter
//! is a process-local map, matching the reference deployment's opaque
//! pass-through token.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::UserId;
use crate::session::SessionToken;

/// Persistence errors raised by session-store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    /// The backing storage failed or is unavailable.
    #[error("session store backend failure: {message}")]
    Backend {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl SessionStoreError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Port for persisting, validating, and revoking session tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record a token for a user.
    async fn persist(&self, token: &SessionToken, user_id: &UserId)
    -> Result<(), SessionStoreError>;

    /// Resolve a token to the user it was issued for, if still valid.
    async fn validate(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError>;

    /// Invalidate a token; revoking an unknown token is not an error.
    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    tokens: Mutex<HashMap<String, UserId>>,
}

impl InMemorySessionStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, UserId>>, SessionStoreError> {
        self.tokens
            .lock()
            .map_err(|_| SessionStoreError::backend("session token lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn persist(
        &self,
        token: &SessionToken,
        user_id: &UserId,
    ) -> Result<(), SessionStoreError> {
        self.lock()?.insert(token.as_str().to_owned(), user_id.clone());
        Ok(())
    }

    async fn validate(&self, token: &SessionToken) -> Result<Option<UserId>, SessionStoreError> {
        Ok(self.lock()?.get(token.as_str()).cloned())
    }

    async fn revoke(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.lock()?.remove(token.as_str());
        Ok(())
    }
}
