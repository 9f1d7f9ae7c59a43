//! Session state value and its persisted snapshot

use recipehub_auth::{IdentityClaims, Role};
use serde::{Deserialize, Serialize};

/// Snapshot format version written under `user-storage`
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    SignedOut,
    SignedIn,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignedOut => write!(f, "signed_out"),
            Self::SignedIn => write!(f, "signed_in"),
        }
    }
}

/// `{isAuthenticated, user, role}` as the UI reads it.
///
/// Built only through [`SessionState::signed_out`] and
/// [`SessionState::signed_in`], which keep `is_authenticated == user.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    is_authenticated: bool,
    user: Option<IdentityClaims>,
    role: Option<Role>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::signed_out()
    }
}

impl SessionState {
    pub fn signed_out() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            role: None,
        }
    }

    pub fn signed_in(user: IdentityClaims) -> Self {
        Self {
            is_authenticated: true,
            role: user.primary_role(),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&IdentityClaims> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_authenticated {
            SessionPhase::SignedIn
        } else {
            SessionPhase::SignedOut
        }
    }

    /// Deserialized snapshots may violate the invariant; live states never do.
    pub(crate) fn is_consistent(&self) -> bool {
        match &self.user {
            Some(user) => {
                self.is_authenticated
                    && !user.role.is_empty()
                    && self.role == user.primary_role()
            }
            None => !self.is_authenticated && self.role.is_none(),
        }
    }
}

/// What is written under `user-storage`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersistedSession {
    pub state: SessionState,
    pub version: u32,
}
