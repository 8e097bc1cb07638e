//! Identity-provider abstraction trait

use crate::domain::{Identity, Result};
use async_trait::async_trait;

/// Identity-provider client trait
///
/// The provider owns the session; the core only ever reads the resolved
/// identity and asks for sign-out.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity behind the ambient session
    ///
    /// Returns `Ok(None)` when no session is active. A user without a role
    /// row resolves to an identity with `role: None`, the least-privileged
    /// case.
    ///
    /// # Errors
    ///
    /// Returns an error if the session token is rejected or the role lookup
    /// fails.
    async fn current_identity(&self) -> Result<Option<Identity>>;

    /// End the current session
    ///
    /// # Errors
    ///
    /// Returns an error if no session is active or the provider refuses the
    /// sign-out.
    async fn sign_out(&self) -> Result<()>;
}
