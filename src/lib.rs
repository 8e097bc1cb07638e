// Medboard - Role-Aware Hospital Operations Console
// Copyright (c) 2025 Medboard Contributors
// Licensed under the MIT License

//! # Medboard - Role-Aware Hospital Operations Console
//!
//! Medboard is a hospital operations console built in Rust that renders
//! dashboard metrics, patient/doctor/staff directories, and drives patient
//! admission against a hosted Postgres backend (PostgREST-style REST, as
//! Supabase exposes it).
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** role-based navigation and write capabilities
//! - **Aggregating** fetched collections (revenue totals, recency rankings,
//!   department histograms) with pure combinators
//! - **Filtering** directories client-side with case-insensitive search
//! - **Admitting** patients with an optional room assignment, including the
//!   compensating rollback when the two-step write partially fails
//!
//! ## Architecture
//!
//! Medboard follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`access`] - Role-to-navigation mapping and capability checks
//! - [`core`] - Business logic (aggregation, filtering, page loaders, admission)
//! - [`adapters`] - External collaborators (hosted data store, identity provider)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medboard::adapters::store::RestStore;
//! use medboard::config::load_config;
//! use medboard::core::dashboard::load_dashboard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("medboard.toml")?;
//!
//!     // Connect to the hosted store
//!     let store = RestStore::new(&config.store, &config.session)?;
//!
//!     // Render the overview metrics
//!     let metrics = load_dashboard(&store, config.dashboard.recent_patients).await;
//!
//!     println!("{} patients admitted", metrics.patient_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Medboard uses the [`domain::MedboardError`] type for all errors; adapter
//! failures are mapped into [`domain::StoreError`] and [`domain::AuthError`]
//! at the adapter boundary so no third-party types leak:
//!
//! ```rust,no_run
//! use medboard::domain::MedboardError;
//!
//! fn example() -> Result<(), MedboardError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = medboard::config::load_config("medboard.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Medboard uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Loading dashboard");
//! warn!(collection = "bills", "Fetch failed, rendering default");
//! error!(error = "update rejected", "Room assignment failed");
//! ```

pub mod access;
pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
