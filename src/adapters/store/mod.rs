//! Hosted data-store adapter
//!
//! The store exposes fixed entity collections (patients, doctors, staff,
//! rooms, bills, user_roles) over a PostgREST-style REST endpoint. The
//! [`DataStore`] trait is the seam the core and the tests program against;
//! [`RestStore`] is the production implementation.

pub mod rest;
pub mod traits;

// Re-export commonly used types
pub use rest::RestStore;
pub use traits::{DataStore, Filter, OrderBy, SelectQuery};
