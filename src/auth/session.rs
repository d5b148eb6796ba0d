//! Session state tracking on top of an [`AuthProvider`].

use super::{
    domain::{AuthSnapshot, Identity},
    ports::{AuthProvider, AuthResult},
};
use std::sync::{Arc, PoisonError, RwLock};

/// Tracks the signed-in user reported by the provider.
///
/// Sign-in and sign-out failures are returned to the caller; a failed
/// session check resolves to signed out.
pub struct AuthSession<P: AuthProvider> {
    provider: Arc<P>,
    snapshot: RwLock<AuthSnapshot>,
}

impl<P: AuthProvider> AuthSession<P> {
    /// Creates a session whose state is pending until [`Self::restore`].
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            snapshot: RwLock::new(AuthSnapshot::pending()),
        }
    }

    /// Returns the current `{user, loading}` snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<Identity> {
        self.snapshot().user
    }

    fn replace(&self, next: AuthSnapshot) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Resolves the initial session check.
    pub async fn restore(&self) -> AuthSnapshot {
        let user = match self.provider.session().await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "session check failed; treating as signed out");
                None
            }
        };
        let snapshot = AuthSnapshot::resolved(user);
        self.replace(snapshot.clone());
        snapshot
    }

    /// Applies a user change pushed by the provider.
    pub fn on_state_change(&self, user: Option<Identity>) {
        self.replace(AuthSnapshot::resolved(user));
    }

    /// Signs in through the provider's Google flow.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`](super::AuthError) unchanged.
    pub async fn sign_in_with_google(&self) -> AuthResult<Identity> {
        let identity = self.provider.sign_in_with_google().await?;
        self.replace(AuthSnapshot::resolved(Some(identity.clone())));
        Ok(identity)
    }

    /// Signs out through the provider.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`](super::AuthError) unchanged; the
    /// user stays signed in locally.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await?;
        self.replace(AuthSnapshot::resolved(None));
        Ok(())
    }
}
