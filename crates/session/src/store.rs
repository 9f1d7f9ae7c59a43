//! Session store
//!
//! Owns the client's [`SessionState`] and keeps its two persisted copies of
//! the raw token in step: the key-value store entry (authoritative for UI
//! state) and the access cookie (what the route guard sees).
//!
//! Constructed once by the application's composition root and shared by
//! cloning; clones observe the same state.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use recipehub_auth::{
    cookie::{TOKEN_COOKIE, TOKEN_COOKIE_PATH},
    IdentityClaims, Role, TokenCodec,
};

use crate::cookies::CookieJar;
use crate::error::SessionError;
use crate::state::{PersistedSession, SessionPhase, SessionState, SNAPSHOT_VERSION};
use crate::storage::{
    persisted_token, read_json, write_json, KeyValueStore, SNAPSHOT_KEY, TOKEN_KEY,
};

#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    codec: TokenCodec,
    storage: Arc<dyn KeyValueStore>,
    cookies: Arc<dyn CookieJar>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build the store, rehydrating the persisted snapshot.
    ///
    /// The snapshot is trusted as-is until the next [`SessionStore::reconcile`].
    pub fn init(
        codec: TokenCodec,
        storage: Arc<dyn KeyValueStore>,
        cookies: Arc<dyn CookieJar>,
    ) -> Self {
        let state = Self::rehydrate(storage.as_ref());
        tracing::debug!(phase = %state.phase(), "Session store initialized");

        Self {
            state: Arc::new(RwLock::new(state)),
            codec,
            storage,
            cookies,
        }
    }

    fn rehydrate(storage: &dyn KeyValueStore) -> SessionState {
        match read_json::<PersistedSession>(storage, SNAPSHOT_KEY) {
            Ok(Some(snapshot)) if snapshot.state.is_consistent() => snapshot.state,
            Ok(Some(snapshot)) => {
                tracing::warn!(
                    version = snapshot.version,
                    "Discarding inconsistent session snapshot"
                );
                SessionState::signed_out()
            }
            Ok(None) => SessionState::signed_out(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session snapshot");
                SessionState::signed_out()
            }
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sign in with a freshly issued token.
    ///
    /// On a decode failure nothing changes and the error is returned.
    pub fn establish(&self, token: &str) -> Result<IdentityClaims, SessionError> {
        let mut state = self.write_state();

        let claims = self.codec.decode(token)?;

        write_json(self.storage.as_ref(), TOKEN_KEY, token)?;
        self.cookies.set(TOKEN_COOKIE, token, TOKEN_COOKIE_PATH);

        *state = SessionState::signed_in(claims.clone());
        self.persist_snapshot(&state);

        tracing::info!(user_id = %claims.id, role = ?state.role(), "Session established");
        Ok(claims)
    }

    /// Sign out. Always succeeds; storage failures are only logged.
    pub fn revoke(&self) {
        let mut state = self.write_state();

        self.clear_persisted_token();
        *state = SessionState::signed_out();
        self.persist_snapshot(&state);

        tracing::info!("Session revoked");
    }

    /// Revalidate the session against the persisted raw token.
    pub fn reconcile(&self, now: i64) -> SessionPhase {
        let mut state = self.write_state();

        *state = match read_json::<String>(self.storage.as_ref(), TOKEN_KEY) {
            Ok(None) => {
                tracing::debug!("No persisted token; session signed out");
                SessionState::signed_out()
            }
            Ok(Some(token)) => match self.codec.decode_unexpired(&token, now) {
                Ok(claims) => {
                    self.cookies.set(TOKEN_COOKIE, &token, TOKEN_COOKIE_PATH);
                    SessionState::signed_in(claims)
                }
                Err(e) => {
                    tracing::warn!(reason = %e, "Persisted token rejected; signing out");
                    self.clear_persisted_token();
                    SessionState::signed_out()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Persisted token unreadable; signing out");
                self.clear_persisted_token();
                SessionState::signed_out()
            }
        };
        self.persist_snapshot(&state);

        state.phase()
    }

    pub fn current_user(&self) -> Option<IdentityClaims> {
        self.state().user().cloned()
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state().role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Raw token from the persistent store
    pub fn token(&self) -> Option<String> {
        persisted_token(self.storage.as_ref())
    }

    /// Flush the snapshot at application shutdown.
    pub fn teardown(self) {
        let state = self.state();
        self.persist_snapshot(&state);
        tracing::debug!(phase = %state.phase(), "Session store torn down");
    }

    fn clear_persisted_token(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted token");
        }
        self.cookies.remove(TOKEN_COOKIE, TOKEN_COOKIE_PATH);
    }

    fn persist_snapshot(&self, state: &SessionState) {
        let snapshot = PersistedSession {
            state: state.clone(),
            version: SNAPSHOT_VERSION,
        };
        if let Err(e) = write_json(self.storage.as_ref(), SNAPSHOT_KEY, &snapshot) {
            tracing::warn!(error = %e, "Failed to persist session snapshot");
        }
    }
}
