//! Session context shared by every view.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds exactly one [`SessionContext`] and provides it. Views read
//! `session` reactively; only the store's `login`/`logout` write it, and a
//! task forwards each watch-channel update into the signal.

use homeschool::{ApiClient, ApiError, ClientConfig, RouteGuard, Session, SessionStore};
use leptos::prelude::*;

use crate::storage::ClientStorage;

pub type ClientSessionStore = SessionStore<ApiClient, ClientStorage>;

#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<Session>,
    pub guard: RouteGuard,
    store: StoredValue<ClientSessionStore, LocalStorage>,
    config: StoredValue<ClientConfig>,
}

impl SessionContext {
    pub fn new(store: ClientSessionStore, config: ClientConfig) -> Self {
        let session = RwSignal::new(store.snapshot());

        #[cfg(feature = "csr")]
        {
            let mut updates = store.subscribe();
            leptos::task::spawn_local(async move {
                while updates.changed().await.is_ok() {
                    let next = updates.borrow_and_update().clone();
                    session.set(next);
                }
            });
        }

        Self {
            session,
            guard: RouteGuard::default(),
            store: StoredValue::new_local(store),
            config: StoredValue::new(config),
        }
    }

    pub fn store(&self) -> ClientSessionStore {
        self.store.get_value()
    }

    pub fn api(&self) -> ApiClient {
        self.store.with_value(|store| store.api().clone())
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    pub fn logout(&self) {
        self.store.with_value(SessionStore::logout);
    }

    /// Log a failed background call. A 401 means the stored token is no
    /// longer accepted, so the session ends and the route guard sends the
    /// user back to the login view.
    pub fn report(&self, action: &str, err: &ApiError) {
        tracing::warn!(action, error = %err, "request failed");
        if err.is_unauthorized() {
            self.logout();
        }
    }
}
