//! Authentication collaborator.
//!
//! The board only needs to know who is signed in and whether the session
//! check has resolved; the provider behind [`ports::AuthProvider`] owns
//! tokens and redirects.

pub mod domain;
pub mod memory;
pub mod ports;
mod session;

pub use domain::{AuthSnapshot, Identity};
pub use ports::{AuthError, AuthProvider, AuthResult};
pub use session::AuthSession;
