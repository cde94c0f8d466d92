//! Session manager.
//!
//! Holds the authenticated caller identity the access rule engine keys on.
//! Login looks a user up by email only — the password is carried opaquely
//! and never verified in this scope, a reproduction of the reference
//! behavior — and failure surfaces as an error result to the caller, unlike
//! queries, which fail closed silently.

use std::fmt;
use std::sync::{Arc, RwLock};

use zeroize::Zeroizing;

use crate::domain::{Email, EmailValidationError, Error, UserProfile};
use crate::store::{SharedStore, read_guard};

pub mod store;

pub use self::store::{InMemorySessionStore, SessionStore, SessionStoreError};

/// Opaque session token handed back to the caller at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a new random token.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated session: the token and the identity it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: SessionToken,
    user: UserProfile,
}

impl Session {
    fn new(token: SessionToken, user: UserProfile) -> Self {
        Self { token, user }
    }

    /// Opaque token backing the session.
    #[must_use]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Identity the session was issued for.
    #[must_use]
    pub fn user(&self) -> &UserProfile {
        &self.user
    }
}

/// Validation errors raised when shaping login input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// The email failed shape validation.
    #[error("login email is invalid: {0}")]
    InvalidEmail(#[from] EmailValidationError),
}

/// Validated login input.
///
/// The email is trimmed before validation; the password is held in a
/// zeroizing buffer and carried opaquely — nothing in this scope verifies
/// it.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email.trim())?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the user lookup.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password as provided by the caller. Opaque: nothing in this scope
    /// verifies it.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Session manager bound to a client's store and session-store port.
#[derive(Clone)]
pub struct Auth {
    store: SharedStore,
    sessions: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl Auth {
    pub(crate) fn new(store: SharedStore, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            sessions,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Authenticate by email and establish a session.
    ///
    /// The password is accepted but not verified. On a lookup miss the
    /// error carries `invalid_credentials` so views can branch on it.
    ///
    /// # Errors
    ///
    /// Fails when the email is malformed, when no user matches it, or when
    /// the session-store port rejects the token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let credentials = LoginCredentials::try_from_parts(email, password)
            .map_err(|err| Error::invalid_credentials(err.to_string()))?;

        let user = {
            let guard = read_guard(&self.store)?;
            guard.find_user_by_email(credentials.email()).cloned()
        };
        let Some(user) = user else {
            tracing::warn!(email = %credentials.email(), "login rejected, no matching user");
            return Err(Error::invalid_credentials("invalid credentials"));
        };

        let token = SessionToken::random();
        self.sessions
            .persist(&token, user.id())
            .await
            .map_err(map_session_error)?;

        let session = Session::new(token, user);
        self.set_current(Some(session.clone()))?;
        tracing::info!(user = %session.user().id(), "login succeeded");
        Ok(session)
    }

    /// Clear the current identity and revoke its token.
    ///
    /// Idempotent: logging out without a session is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when the session-store port rejects the revocation.
    pub async fn logout(&self) -> Result<(), Error> {
        let previous = self.take_current()?;
        if let Some(session) = previous {
            self.sessions
                .revoke(session.token())
                .await
                .map_err(map_session_error)?;
            tracing::info!(user = %session.user().id(), "logout succeeded");
        }
        Ok(())
    }

    /// Rehydrate the identity from the persisted session token.
    ///
    /// Idempotent: while the token stays valid and the user exists, every
    /// call returns the same identity. Returns `None` once the token is
    /// revoked or the user vanished from the store, clearing the held
    /// identity in the process.
    ///
    /// # Errors
    ///
    /// Fails when the session-store port is unavailable.
    pub async fn check_session(&self) -> Result<Option<Session>, Error> {
        let Some(held) = self.current()? else {
            return Ok(None);
        };

        let user_id = self
            .sessions
            .validate(held.token())
            .await
            .map_err(map_session_error)?;
        let Some(user_id) = user_id else {
            self.set_current(None)?;
            return Ok(None);
        };

        let user = {
            let guard = read_guard(&self.store)?;
            guard.find_user_by_id(&user_id).cloned()
        };
        let Some(user) = user else {
            self.set_current(None)?;
            return Ok(None);
        };

        let refreshed = Session::new(held.token().clone(), user);
        self.set_current(Some(refreshed.clone()))?;
        Ok(Some(refreshed))
    }

    /// The current caller identity.
    ///
    /// # Errors
    ///
    /// Fails with `unauthenticated` when no session is established.
    pub fn current_profile(&self) -> Result<UserProfile, Error> {
        self.caller()
            .ok_or_else(|| Error::unauthenticated("no session established"))
    }

    /// Caller identity for the access rule engine; `None` fails closed.
    pub(crate) fn caller(&self) -> Option<UserProfile> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|session| session.user().clone()))
    }

    fn current(&self) -> Result<Option<Session>, Error> {
        Ok(self
            .current
            .read()
            .map_err(|_| Error::internal("session state lock poisoned"))?
            .clone())
    }

    fn set_current(&self, session: Option<Session>) -> Result<(), Error> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| Error::internal("session state lock poisoned"))?;
        *guard = session;
        Ok(())
    }

    fn take_current(&self) -> Result<Option<Session>, Error> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| Error::internal("session state lock poisoned"))?;
        Ok(guard.take())
    }
}

fn map_session_error(error: SessionStoreError) -> Error {
    Error::internal(format!("session store error: {error}"))
}
