//! In-memory authentication provider for tests and local demos.

use super::{
    domain::Identity,
    ports::{AuthError, AuthProvider, AuthResult},
};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
struct ProviderState {
    account: Identity,
    signed_in: bool,
    unavailable: bool,
}

/// Provider with a single account that signs in without a redirect.
#[derive(Debug, Clone)]
pub struct InMemoryAuthProvider {
    state: Arc<RwLock<ProviderState>>,
}

impl InMemoryAuthProvider {
    /// Creates a signed-out provider for `account`.
    #[must_use]
    pub fn new(account: Identity) -> Self {
        Self {
            state: Arc::new(RwLock::new(ProviderState {
                account,
                signed_in: false,
                unavailable: false,
            })),
        }
    }

    /// Creates a provider whose session is already established.
    #[must_use]
    pub fn signed_in(account: Identity) -> Self {
        let provider = Self::new(account);
        provider.write().signed_in = true;
        provider
    }

    /// Makes every subsequent call fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.write().unavailable = unavailable;
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ProviderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ProviderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn session(&self) -> AuthResult<Option<Identity>> {
        let state = self.read();
        if state.unavailable {
            return Err(AuthError::Session("provider unavailable".to_owned()));
        }
        Ok(state.signed_in.then(|| state.account.clone()))
    }

    async fn sign_in_with_google(&self) -> AuthResult<Identity> {
        let mut state = self.write();
        if state.unavailable {
            return Err(AuthError::SignIn("provider unavailable".to_owned()));
        }
        state.signed_in = true;
        Ok(state.account.clone())
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let mut state = self.write();
        if state.unavailable {
            return Err(AuthError::SignOut("provider unavailable".to_owned()));
        }
        state.signed_in = false;
        Ok(())
    }
}
