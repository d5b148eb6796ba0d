//! Signed-in identity and the session snapshot exposed to the board.

use crate::task::domain::OwnerId;
use serde::{Deserialize, Serialize};

/// Authenticated user as seen by the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: OwnerId,
    email: Option<String>,
}

impl Identity {
    /// Creates an identity for `id`.
    #[must_use]
    pub const fn new(id: OwnerId) -> Self {
        Self { id, email: None }
    }

    /// Sets the account email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the owner identifier scoping task records.
    #[must_use]
    pub const fn id(&self) -> OwnerId {
        self.id
    }

    /// Returns the account email, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Current authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Signed-in user, if any.
    pub user: Option<Identity>,
    /// `true` until the initial session check resolves.
    pub loading: bool,
}

impl AuthSnapshot {
    /// Snapshot before the session check has resolved.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Snapshot of a resolved session.
    #[must_use]
    pub const fn resolved(user: Option<Identity>) -> Self {
        Self {
            user,
            loading: false,
        }
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self::pending()
    }
}
