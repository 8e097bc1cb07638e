//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Medboard using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Medboard - Hospital Operations Console
#[derive(Parser, Debug)]
#[command(name = "medboard")]
#[command(version, about, long_about = None)]
#[command(author = "Medboard Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medboard.toml", env = "MEDBOARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show overview metrics (counts, revenue, recent admissions)
    Dashboard(commands::dashboard::DashboardArgs),

    /// Browse the patient directory or admit a patient
    Patients(commands::patients::PatientsArgs),

    /// Browse the doctor directory
    Doctors(commands::doctors::DoctorsArgs),

    /// Browse the staff directory (admin only)
    Staff(commands::staff::StaffArgs),

    /// Show the current identity, role, and navigation menu
    Whoami(commands::whoami::WhoamiArgs),

    /// End the current session
    Logout(commands::logout::LogoutArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
