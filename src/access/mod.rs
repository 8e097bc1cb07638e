//! Access control: role-to-navigation mapping and capability checks
//!
//! This module is the single source of truth for what a role may see and
//! do. Pages never infer permissions on their own; they ask [`resolve_menu`]
//! and [`can_perform`] with an explicitly passed role.

pub mod capability;
pub mod menu;

pub use capability::{can_perform, Capability};
pub use menu::{resolve_menu, NavDestination};
