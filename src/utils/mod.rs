use anyhow::Result;

use crate::builders::records::PaymentMethod;
use crate::builders::reporter::{ConsoleReporter, StatusReporter, WorkspaceStatus};
use crate::builders::scheduler::BookingRequest;
use crate::core::config::{ConfigManager, ConfigProvider};
use crate::core::engine::ClinicEngine;
use crate::core::error::ClinicError;
use crate::core::store::Store;

// Command handlers: one function per CLI subcommand. Each handler builds an
// engine, runs a single operation, and turns the outcome into console
// output. Domain errors (validation, conflict) are recovered here into
// ✗-prefixed messages; persistence errors propagate and abort the command.

pub fn initialize_workspace() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    config_manager.initialize()?;

    // Opening the store once creates the database tables up front.
    let db_path = config_manager.database_path()?;
    Store::open(&db_path)?;

    println!("✓ Initialized clinic workspace");
    println!(
        "Configuration written to {}",
        config_manager.get_config_path()?.display()
    );
    Ok(())
}

pub fn validate_config() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    config_manager.validate_config()
}

pub fn register_patient(name: &str, national_id: &str, phone: &str, birth_date: &str)
-> Result<()> {
    let engine = engine()?;
    match engine.register_patient(name, national_id, phone, birth_date) {
        Ok(id) => {
            println!("✓ Patient registered ({id})");
            Ok(())
        }
        Err(e) => recover(e),
    }
}

pub fn list_patients() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let verbose = config_manager.load_config()?.global_settings.verbose;
    let engine = ClinicEngine::new(&config_manager)?;
    let patients = engine.list_patients()?;

    if patients.is_empty() {
        println!("No patients registered.");
        return Ok(());
    }
    let reporter = ConsoleReporter::new();
    for patient in &patients {
        println!("{}", reporter.format_patient(patient, verbose));
    }
    Ok(())
}

pub fn search_patients(text: &str) -> Result<()> {
    let engine = engine()?;
    let patients = engine.search_patients(text)?;

    if patients.is_empty() {
        println!("No patients match '{text}'.");
        return Ok(());
    }
    let reporter = ConsoleReporter::new();
    for patient in &patients {
        // Always verbose here: a search is usually the prelude to a delete.
        println!("{}", reporter.format_patient(patient, true));
    }
    Ok(())
}

pub fn remove_patient(id: &str) -> Result<()> {
    let engine = engine()?;
    engine.delete_patient(id)?;
    println!("✓ Patient {id} removed");
    Ok(())
}

pub fn schedule_appointment(
    patient_name: &str,
    patient_id: Option<&str>,
    doctor_id: &str,
    date: &str,
    time: &str,
) -> Result<()> {
    let engine = engine()?;
    let request = BookingRequest {
        patient_name: patient_name.to_string(),
        patient_id: patient_id.map(str::to_string),
        doctor_id: doctor_id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
    };
    match engine.schedule_appointment(&request) {
        Ok(id) => {
            println!("✓ Appointment booked ({id})");
            Ok(())
        }
        Err(e) => recover(e),
    }
}

pub fn list_appointments() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let verbose = config_manager.load_config()?.global_settings.verbose;
    let engine = ClinicEngine::new(&config_manager)?;
    let appointments = engine.list_appointments()?;

    if appointments.is_empty() {
        println!("No appointments booked.");
        return Ok(());
    }
    let reporter = ConsoleReporter::new();
    for appt in &appointments {
        println!("{}", reporter.format_appointment(appt, verbose));
    }
    Ok(())
}

pub fn cancel_appointment(id: &str) -> Result<()> {
    let engine = engine()?;
    engine.delete_appointment(id)?;
    println!("✓ Appointment {id} cancelled");
    Ok(())
}

pub fn pay(patient_name: &str, amount: &str, method: PaymentMethod) -> Result<()> {
    let engine = engine()?;
    match engine.pay(patient_name, amount, &method) {
        Ok(receipt) => {
            println!("✓ Payment recorded: {} (ref {})", receipt.outcome, receipt.reference);
            Ok(())
        }
        Err(e) => recover(e),
    }
}

pub fn list_payments() -> Result<()> {
    let engine = engine()?;
    let payments = engine.list_payments()?;

    if payments.is_empty() {
        println!("No payments recorded.");
        return Ok(());
    }
    let reporter = ConsoleReporter::new();
    for payment in &payments {
        println!("{}", reporter.format_payment(payment));
    }
    Ok(())
}

pub fn list_doctors() -> Result<()> {
    let engine = engine()?;
    for doctor in engine.roster() {
        println!("{}  {}", doctor.code, doctor.name);
    }
    Ok(())
}

pub fn show_status() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_config()?;
    let engine = ClinicEngine::new(&config_manager)?;

    let patients = engine.list_patients()?;
    let appointments = engine.list_appointments()?;
    let payments = engine.list_payments()?;
    let status = WorkspaceStatus::from_records(&patients, &appointments, &payments);

    ConsoleReporter::new().generate_status_report(&config, &status)
}

pub fn export_records(file_path: &str, format: &str) -> Result<()> {
    let engine = engine()?;
    engine.export_records(file_path, format)?;
    println!("✓ Exported records to {file_path} ({format})");
    Ok(())
}

// Helper to build an engine from the discovered workspace.
fn engine() -> Result<ClinicEngine> {
    let config_manager = ConfigManager::new()?;
    ClinicEngine::new(&config_manager)
}

/// Recovers a domain error into a console message; persistence errors are
/// fatal and keep propagating.
fn recover(e: ClinicError) -> Result<()> {
    if e.is_recoverable() {
        println!("✗ {e}");
        Ok(())
    } else {
        Err(e.into())
    }
}
