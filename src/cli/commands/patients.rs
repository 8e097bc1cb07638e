//! Patients command implementation
//!
//! This module implements the `patients` command: the patient directory,
//! the room listing for admission, and the role-gated `add` admission flow.

use crate::adapters::identity::{IdentityProvider, RestIdentity};
use crate::adapters::store::RestStore;
use crate::cli::commands::exit_code_for;
use crate::config::{load_config, MedboardConfig};
use crate::core::admission::admit_patient;
use crate::core::directory::{available_rooms, load_patients};
use crate::domain::errors::{AdmissionError, MedboardError};
use crate::domain::{Patient, PatientDraft, PatientStatus, RecordId};
use clap::{Args, Subcommand};
use std::str::FromStr;

/// Arguments for the patients command
#[derive(Args, Debug)]
pub struct PatientsArgs {
    /// Filter the directory by name, patient id, or department
    #[arg(short, long)]
    pub search: Option<String>,

    /// Subcommand to execute; the default lists the directory
    #[command(subcommand)]
    pub command: Option<PatientsCommand>,
}

/// Patients subcommands
#[derive(Subcommand, Debug)]
pub enum PatientsCommand {
    /// Admit a new patient, optionally into a room
    Add(AddPatientArgs),

    /// List rooms available for admission
    Rooms,
}

/// Arguments for the add subcommand
///
/// Free-text fields ride into [`PatientDraft`] exactly as entered; the
/// draft's field-level validation decides what is acceptable.
#[derive(Args, Debug)]
pub struct AddPatientArgs {
    /// Human-readable patient id (e.g. P-1042)
    #[arg(long)]
    pub patient_id: String,

    /// Full name
    #[arg(long)]
    pub full_name: String,

    /// Age in years
    #[arg(long)]
    pub age: String,

    /// Gender
    #[arg(long)]
    pub gender: String,

    /// Blood type
    #[arg(long, default_value = "")]
    pub blood_type: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Home address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Emergency contact name
    #[arg(long, default_value = "")]
    pub emergency_contact: String,

    /// Emergency contact phone
    #[arg(long, default_value = "")]
    pub emergency_phone: String,

    /// Department
    #[arg(long)]
    pub department: String,

    /// Admitting condition
    #[arg(long)]
    pub condition: String,

    /// Initial status (stable, critical, recovering, discharged)
    #[arg(long, default_value = "stable")]
    pub status: String,

    /// Room id to admit into
    #[arg(long)]
    pub room: Option<String>,

    /// Comma-separated medication list
    #[arg(long, default_value = "")]
    pub medications: String,

    /// Comma-separated allergy list
    #[arg(long, default_value = "")]
    pub allergies: String,

    /// Validate and simulate without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl PatientsArgs {
    /// Execute the patients command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Connect to the hosted store
        let store = match RestStore::new(&config.store, &config.session) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to build store client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match &self.command {
            Some(PatientsCommand::Add(args)) => admit(args, &config, &store).await,
            Some(PatientsCommand::Rooms) => list_rooms(&store).await,
            None => list_patients(&store, self.search.as_deref().unwrap_or("")).await,
        }
    }
}

/// List the patient directory
async fn list_patients(store: &RestStore, search: &str) -> anyhow::Result<i32> {
    tracing::info!(search, "Listing patients");

    let rows = match load_patients(store, search).await {
        Ok(rows) => rows,
        Err(e) => {
            println!("❌ Failed to load the patient directory");
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }
    };

    println!("🏥 Patient Directory");
    println!();

    if rows.is_empty() {
        println!("No patients match.");
        return Ok(0);
    }

    println!("Found {} patient(s):", rows.len());
    println!();
    println!(
        "{:<10} {:<24} {:>4} {:<16} {:<12} {:<8} {:<12}",
        "ID", "Name", "Age", "Department", "Status", "Room", "Admitted"
    );
    println!("{}", "-".repeat(92));

    for row in &rows {
        match serde_json::from_value::<Patient>(row.clone()) {
            Ok(patient) => {
                let admitted = patient
                    .admission_date
                    .get(..10)
                    .unwrap_or(&patient.admission_date);
                println!(
                    "{:<10} {:<24} {:>4} {:<16} {:<12} {:<8} {:<12}",
                    patient.patient_id,
                    patient.full_name,
                    patient.age,
                    patient.department,
                    patient.status.to_string(),
                    patient.room_number().unwrap_or("-"),
                    admitted
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable patient row");
            }
        }
    }

    println!();
    Ok(0)
}

/// List rooms available for admission
async fn list_rooms(store: &RestStore) -> anyhow::Result<i32> {
    tracing::info!("Listing available rooms");

    let rooms = match available_rooms(store).await {
        Ok(rooms) => rooms,
        Err(e) => {
            println!("❌ Failed to load available rooms");
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }
    };

    println!("🛏️  Available Rooms");
    println!();

    if rooms.is_empty() {
        println!("No rooms are available.");
        return Ok(0);
    }

    println!(
        "{:<38} {:<10} {:<12} {:<6}",
        "ID", "Number", "Type", "Floor"
    );
    println!("{}", "-".repeat(70));
    for room in &rooms {
        println!(
            "{:<38} {:<10} {:<12} {:<6}",
            room.id,
            room.room_number,
            room.room_type,
            room.floor.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string())
        );
    }

    println!();
    Ok(0)
}

/// Admit a patient via the two-step admission transaction
async fn admit(
    args: &AddPatientArgs,
    config: &MedboardConfig,
    store: &RestStore,
) -> anyhow::Result<i32> {
    tracing::info!(patient_id = %args.patient_id, "Admitting patient");

    // Resolve the acting identity; the capability check inside the
    // admission flow is the single source of truth for authorization.
    let identity = match RestIdentity::new(&config.store, &config.session) {
        Ok(i) => i,
        Err(e) => {
            println!("❌ Failed to build identity client");
            println!("   Error: {e}");
            return Ok(2);
        }
    };
    let identity = match identity.current_identity().await {
        Ok(i) => i,
        Err(e) => {
            println!("❌ Failed to resolve the current identity");
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }
    };
    let role = identity.as_ref().and_then(|i| i.role);

    let status = match PatientStatus::from_str(&args.status) {
        Ok(s) => s,
        Err(e) => {
            println!("❌ Invalid status");
            println!("   {e}");
            return Ok(2);
        }
    };

    let room_id = match &args.room {
        None => None,
        Some(raw) => match RecordId::from_str(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                println!("❌ Invalid room id");
                println!("   {e}");
                return Ok(2);
            }
        },
    };

    let draft = PatientDraft {
        patient_id: args.patient_id.clone(),
        full_name: args.full_name.clone(),
        age: args.age.clone(),
        gender: args.gender.clone(),
        blood_type: args.blood_type.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
        address: args.address.clone(),
        emergency_contact: args.emergency_contact.clone(),
        emergency_phone: args.emergency_phone.clone(),
        department: args.department.clone(),
        condition: args.condition.clone(),
        status,
        room_id,
        medications: args.medications.clone(),
        allergies: args.allergies.clone(),
    };

    let dry_run = args.dry_run || config.application.dry_run;
    if dry_run {
        println!("🔍 DRY RUN MODE - No records will be written");
        println!();
    }

    match admit_patient(store, role, draft, dry_run).await {
        Ok(row) => {
            let patient_id = row
                .get("patient_id")
                .and_then(|v| v.as_str())
                .unwrap_or("?");
            if dry_run {
                println!("✅ Dry run complete: admission for {patient_id} validated");
            } else {
                println!("✅ Patient admitted: {patient_id}");
                if let Some(room) = &args.room {
                    println!("   Room {room} marked occupied");
                }
            }
            Ok(0)
        }
        Err(MedboardError::Admission(AdmissionError::RoomAssignmentFailed {
            patient_id,
            room_id,
            reason,
            rolled_back,
        })) => {
            println!("❌ Room assignment failed: {reason}");
            if rolled_back {
                println!("   Patient record {patient_id} was rolled back; retry the admission.");
            } else {
                println!(
                    "   Patient record {patient_id} references room {room_id}, but the room is NOT marked occupied."
                );
                println!("   Reconcile the records manually before retrying.");
            }
            Ok(5)
        }
        Err(e) => {
            println!("❌ Admission failed");
            println!("   Error: {e}");
            Ok(exit_code_for(&e))
        }
    }
}
