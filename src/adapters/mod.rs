//! External collaborators for Medboard.
//!
//! This module provides adapters for the two external systems the core
//! consumes:
//!
//! - [`store`] - Hosted data store (PostgREST-style REST over Postgres)
//! - [`identity`] - Identity provider (ambient session, role lookup, sign-out)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. Both collaborators are
//! trait-based ([`store::DataStore`], [`identity::IdentityProvider`]) so the
//! core and the integration tests never depend on a live backend.
//!
//! Authentication is ambient: the configured API key and session token ride
//! every request, and the backend's row-level security policies do their own
//! enforcement behind the client-side capability checks.

pub mod identity;
pub mod store;
