//! Core business logic for Medboard.
//!
//! This module contains the decision logic every page shares instead of
//! reimplementing it inline:
//!
//! - [`aggregate`] - Pure collection reductions (revenue totals, recency
//!   rankings, department histograms)
//! - [`filter`] - Client-side free-text search over fetched collections
//! - [`dashboard`] - Overview metrics loader (concurrent fetches, safe
//!   defaults on failure)
//! - [`directory`] - Patient/doctor/staff directory loaders
//! - [`admission`] - The two-step patient-admission transaction with its
//!   compensating rollback
//!
//! Control flow is always store → raw collections → pure transform →
//! rendered view. The transforms never mutate their inputs, and nothing in
//! this module reads ambient session state; the acting role is passed in
//! explicitly where a decision depends on it.

pub mod admission;
pub mod aggregate;
pub mod dashboard;
pub mod directory;
pub mod filter;

// Re-export commonly used items
pub use admission::admit_patient;
pub use aggregate::{group_count, most_recent, sum_amounts};
pub use dashboard::{load_dashboard, DashboardMetrics};
pub use directory::{available_rooms, load_doctors, load_patients, load_staff};
pub use filter::{field_text, filter_rows};
