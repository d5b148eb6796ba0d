//! Port contract for the external authentication provider.

use super::domain::Identity;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors raised by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The provider could not report the current session.
    #[error("session check failed: {0}")]
    Session(String),
    /// Sign-in was rejected or interrupted.
    #[error("sign-in failed: {0}")]
    SignIn(String),
    /// Sign-out failed.
    #[error("sign-out failed: {0}")]
    SignOut(String),
}

/// External identity provider.
///
/// Token handling and redirects stay behind this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the current session's user, if signed in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Session`] when the provider is unreachable.
    async fn session(&self) -> AuthResult<Option<Identity>>;

    /// Runs the Google sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignIn`] when the flow fails.
    async fn sign_in_with_google(&self) -> AuthResult<Identity>;

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignOut`] when the provider rejects the request.
    async fn sign_out(&self) -> AuthResult<()>;
}
