//! Session store: the one owner of a client's authentication state.
//!
//! DESIGN
//! ======
//! A [`SessionStore`] is built once per running client and handed down
//! explicitly (Leptos context in the browser, a local in the CLI). It owns a
//! `tokio::sync::watch` channel: `login`/`logout` are the only writers, and
//! every reader either takes a [`SessionStore::snapshot`] or holds a
//! receiver from [`SessionStore::subscribe`].
//!
//! Durable storage mirrors the session under three keys (`token`, `role`,
//! `userId`). Construction rehydrates from a complete triple without any
//! network call; a partial or unparsable triple is treated as anonymous.
//!
//! ERROR HANDLING
//! ==============
//! A failed login sets `login_error` and leaves the rest of the session as it
//! was. Storage write failures are logged and do not undo an in-memory login:
//! the user stays signed in for this page, only reload persistence is lost.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::watch;

use crate::net::ApiError;
use crate::net::ApiResult;
use crate::net::types::{AuthGrant, Credentials};
use crate::role::Role;
use crate::storage::{DurableStorage, ROLE_KEY, SESSION_KEYS, TOKEN_KEY, USER_ID_KEY};

pub const REGISTRATION_FALLBACK_MESSAGE: &str = "An unexpected error occurred during registration.";

/// Remote operations the store depends on. [`crate::ApiClient`] is the real
/// implementation; tests substitute a scripted mock.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait AuthApi {
    async fn authenticate(&self, credentials: &Credentials) -> ApiResult<AuthGrant>;

    async fn register(&self, credentials: &Credentials) -> ApiResult<()>;

    /// Install (`Some`) or remove (`None`) the bearer credential used for
    /// subsequent requests.
    fn set_bearer_token(&self, token: Option<String>);
}

// =============================================================================
// SESSION
// =============================================================================

/// Authentication state of one client. Logged-in is derived from the token,
/// so a logged-in session without a token cannot be constructed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    role: Option<Role>,
    user_id: Option<i64>,
    login_error: Option<String>,
    pending: bool,
}

impl Session {
    #[must_use]
    pub fn authenticated(token: impl Into<String>, role: Role, user_id: i64) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
            user_id: Some(user_id),
            login_error: None,
            pending: false,
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    #[must_use]
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// A login request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("login_error", &self.login_error)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// STORE
// =============================================================================

struct Inner<A, S> {
    api: A,
    storage: S,
    state: watch::Sender<Session>,
}

pub struct SessionStore<A, S> {
    inner: Arc<Inner<A, S>>,
}

impl<A, S> Clone for SessionStore<A, S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<A: AuthApi, S: DurableStorage> SessionStore<A, S> {
    /// Create the store, rehydrating from `storage` when it holds a complete
    /// token/role/userId triple. The stored token is trusted as-is; a later
    /// 401 from any call is the signal to [`logout`](Self::logout).
    pub fn new(api: A, storage: S) -> Self {
        let initial = rehydrate(&storage).unwrap_or_default();
        if let Some(token) = initial.token() {
            api.set_bearer_token(Some(token.to_owned()));
            tracing::info!(role = ?initial.role(), user_id = ?initial.user_id(), "session rehydrated from storage");
        }
        let (state, _) = watch::channel(initial);
        Self { inner: Arc::new(Inner { api, storage, state }) }
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every session change after this call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Whether durable storage holds the token of the current session (or no
    /// token when anonymous). Storage failures during `login`/`logout` are
    /// only logged; callers that need the session to outlive the process
    /// check this afterwards.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        let stored = self.inner.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        stored.as_deref() == self.inner.state.borrow().token()
    }

    /// Authenticate and, on success, persist and publish the new session.
    ///
    /// # Errors
    ///
    /// Returns the remote failure. The same failure is published as the
    /// session's `login_error`; token, role and user id are left untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.inner.state.send_modify(|session| {
            session.login_error = None;
            session.pending = true;
        });

        let credentials = Credentials::new(username, password);
        match self.inner.api.authenticate(&credentials).await {
            Ok(grant) => {
                self.persist(&grant);
                self.inner.api.set_bearer_token(Some(grant.token.clone()));
                tracing::info!(user_id = grant.user_id, role = %grant.role, "login succeeded");
                self.inner
                    .state
                    .send_replace(Session::authenticated(grant.token, grant.role, grant.user_id));
                Ok(())
            }
            Err(err) => {
                tracing::info!(username, error = %err, "login rejected");
                let message = err.user_message();
                self.inner.state.send_modify(|session| {
                    session.login_error = Some(message);
                    session.pending = false;
                });
                Err(err)
            }
        }
    }

    /// Return to the anonymous session. Safe to call repeatedly; subscribers
    /// are only notified when something actually changed.
    pub fn logout(&self) {
        for key in SESSION_KEYS {
            if let Err(err) = self.inner.storage.remove(key) {
                tracing::warn!(key, error = %err, "failed to clear stored session key");
            }
        }
        self.inner.api.set_bearer_token(None);

        let changed = self.inner.state.send_if_modified(|session| {
            if *session == Session::default() {
                return false;
            }
            *session = Session::default();
            true
        });
        if changed {
            tracing::info!("logged out");
        }
    }

    /// Create a new account. The current session is not changed.
    ///
    /// # Errors
    ///
    /// Returns the remote failure; see [`registration_failure_message`] for
    /// the text to show.
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<()> {
        let credentials = Credentials::new(username, password);
        self.inner.api.register(&credentials).await?;
        tracing::info!(username, "registered new user");
        Ok(())
    }

    fn persist(&self, grant: &AuthGrant) {
        let user_id = grant.user_id.to_string();
        let entries = [(TOKEN_KEY, grant.token.as_str()), (ROLE_KEY, grant.role.as_str()), (USER_ID_KEY, user_id.as_str())];
        for (key, value) in entries {
            if let Err(err) = self.inner.storage.set(key, value) {
                tracing::warn!(key, error = %err, "failed to persist session key");
            }
        }
    }
}

fn rehydrate<S: DurableStorage>(storage: &S) -> Option<Session> {
    let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
    let role = storage.get(ROLE_KEY)?.parse::<Role>().ok()?;
    let user_id = storage.get(USER_ID_KEY)?.trim().parse::<i64>().ok()?;
    Some(Session::authenticated(token, role, user_id))
}

/// Text shown when registration fails: the server's message when it sent one.
#[must_use]
pub fn registration_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
        _ => REGISTRATION_FALLBACK_MESSAGE.to_owned(),
    }
}
