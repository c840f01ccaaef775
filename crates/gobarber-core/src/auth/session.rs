use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthApi, Credentials};
use crate::storage::{Storage, TOKEN_KEY, USER_KEY};

/// User profile as returned by the backend.
///
/// Only `id` is required. Fields the client does not know about are kept in
/// `extra` so the profile round-trips through storage unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Name for greetings, falling back to e-mail and then id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// An authenticated session. Token and user always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct SessionStore {
    storage: Arc<dyn Storage>,
    api: Arc<dyn AuthApi>,
    state: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Build the store from whatever is persisted. Never fails: missing,
    /// partial or malformed data leaves the store anonymous.
    pub fn restore(storage: Arc<dyn Storage>, api: Arc<dyn AuthApi>) -> Self {
        let session = Self::read_persisted(storage.as_ref());
        debug!(authenticated = session.is_some(), "Session restored");

        let (state, _) = watch::channel(session);
        Self {
            storage,
            api,
            state,
        }
    }

    fn read_item(storage: &dyn Storage, key: &str) -> Option<String> {
        match storage.get_item(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, key, "Failed to read session storage");
                None
            }
        }
    }

    fn read_persisted(storage: &dyn Storage) -> Option<Session> {
        let token = Self::read_item(storage, TOKEN_KEY);
        let raw_user = Self::read_item(storage, USER_KEY);

        let user = raw_user.as_deref().and_then(|raw| {
            serde_json::from_str::<User>(raw)
                .map_err(|e| warn!(error = %e, "Discarding malformed stored user"))
                .ok()
        });

        match (token, user) {
            (Some(token), Some(user)) => Some(Session { token, user }),
            (None, None) if raw_user.is_none() => None,
            _ => {
                // Half a session is no session; drop the leftovers
                warn!("Incomplete persisted session, clearing it");
                Self::clear_persisted(storage);
                None
            }
        }
    }

    fn clear_persisted(storage: &dyn Storage) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = storage.remove_item(key) {
                warn!(error = %e, key, "Failed to clear session storage");
            }
        }
    }

    /// Authenticate against the API. On success the session is persisted and
    /// published in one step; on failure the previous session is untouched.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<()> {
        let response = self.api.create_session(credentials).await?;
        if response.token.is_empty() {
            // restore() would read this back as signed out
            return Err(ApiError::InvalidResponse("empty session token".into()).into());
        }

        let user_json = serde_json::to_string(&response.user)?;
        if let Err(e) = self.storage.set_item(TOKEN_KEY, &response.token) {
            warn!(error = %e, "Failed to persist token");
        }
        if let Err(e) = self.storage.set_item(USER_KEY, &user_json) {
            warn!(error = %e, "Failed to persist user");
        }

        info!(user_id = %response.user.id, "Signed in");
        self.state.send_replace(Some(Session {
            token: response.token,
            user: response.user,
        }));
        Ok(())
    }

    /// Forget the session locally. No remote call is made.
    pub fn sign_out(&self) {
        Self::clear_persisted(self.storage.as_ref());
        if self.state.send_replace(None).is_some() {
            info!("Signed out");
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Read-only view that is notified on every sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}
