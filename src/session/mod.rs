//! Authenticated-session context.
//!
//! A [`Session`] is created once at startup from the durable store and then
//! handed to whatever needs it (the API client, views, navigation). Teardown
//! clears both memory and storage and tells subscribers why.

pub mod store;

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::user::{SessionUser, UserRole};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Anonymous,
    SignedIn(UserRole),
    SignedOut,
    /// The backend rejected the token (HTTP 401).
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownReason {
    Logout,
    Expired,
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn SessionStore>,
    state: RwLock<Option<SessionData>>,
    events: watch::Sender<SessionEvent>,
}

impl Session {
    /// Rehydrate from `store`. Storage is read here and nowhere else; a user
    /// entry that no longer parses invalidates the stored token too.
    pub fn init(store: Arc<dyn SessionStore>) -> Result<Self> {
        let token = store.get(TOKEN_KEY)?;
        let user = store.get(USER_KEY)?;

        let data = match (token, user) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<SessionUser>(&raw_user) {
                Ok(user) => Some(SessionData { token, user }),
                Err(e) => {
                    warn!(error = %e, "Stored user is unreadable, clearing session");
                    store.remove(USER_KEY)?;
                    store.remove(TOKEN_KEY)?;
                    None
                }
            },
            _ => None,
        };

        let initial = match &data {
            Some(d) => SessionEvent::SignedIn(d.user.role),
            None => SessionEvent::Anonymous,
        };
        let (events, _) = watch::channel(initial);

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                state: RwLock::new(data),
                events,
            }),
        })
    }

    pub fn establish(&self, token: String, user: SessionUser) -> Result<()> {
        let raw_user = serde_json::to_string(&user)?;
        self.inner.store.set(TOKEN_KEY, &token)?;
        if let Err(e) = self.inner.store.set(USER_KEY, &raw_user) {
            // A token without its user would rehydrate as a half session.
            if let Err(cleanup) = self.inner.store.remove(TOKEN_KEY) {
                warn!(error = %cleanup, "Failed to roll back stored token");
            }
            return Err(e);
        }

        let role = user.role;
        *self.write_state() = Some(SessionData { token, user });
        self.inner.events.send_replace(SessionEvent::SignedIn(role));
        info!(role = %role, "Session established");
        Ok(())
    }

    /// Forget the session. Storage failures are logged, never returned, so a
    /// teardown always leaves the in-memory session cleared.
    pub fn teardown(&self, reason: TeardownReason) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.inner.store.remove(key) {
                warn!(key, error = %e, "Failed to clear stored session entry");
            }
        }
        *self.write_state() = None;

        let event = match reason {
            TeardownReason::Logout => SessionEvent::SignedOut,
            TeardownReason::Expired => SessionEvent::Expired,
        };
        self.inner.events.send_replace(event);
        info!(?reason, "Session cleared");
    }

    pub fn token(&self) -> Option<String> {
        self.read_state().as_ref().map(|d| d.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read_state().as_ref().map(|d| d.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn last_event(&self) -> SessionEvent {
        *self.inner.events.borrow()
    }

    /// The durable store, shared with features that keep their own keys.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.inner.store
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, Option<SessionData>> {
        self.inner.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, Option<SessionData>> {
        self.inner.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
