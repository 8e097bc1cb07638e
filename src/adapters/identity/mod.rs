//! Identity-provider adapter
//!
//! Resolves "who is acting now" from the ambient session: the authenticated
//! user id, the application role issued for the session, and sign-out. The
//! resolved [`Identity`](crate::domain::Identity) is passed explicitly into
//! the access layer; nothing else reads session state.

pub mod rest;
pub mod traits;

// Re-export commonly used types
pub use rest::RestIdentity;
pub use traits::IdentityProvider;
