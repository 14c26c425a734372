use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use uuid::Uuid;

use crate::builders::payments;
use crate::builders::records::{Appointment, Patient, Payment, PaymentMethod, PaymentReceipt};
use crate::builders::scheduler::{self, BookingRequest};
use crate::builders::validator;
use crate::core::config::{ClinicConfig, ConfigManager, ConfigProvider, Doctor};
use crate::core::error::ClinicError;
use crate::core::store::Store;

/// The operation surface the presentation layer talks to.
///
/// The engine owns the loaded configuration (including the doctor roster)
/// and the database location. It does not hold an open connection: each
/// operation opens a scoped [`Store`], runs its statements, and releases the
/// handle before returning. Validation failures happen before any handle is
/// opened.
pub struct ClinicEngine {
    config: ClinicConfig,
    db_path: PathBuf,
}

impl ClinicEngine {
    pub fn new(config_manager: &ConfigManager) -> Result<Self> {
        let config = config_manager.load_config()?;
        let db_path = config_manager.database_path()?;
        Ok(Self { config, db_path })
    }

    fn open_store(&self) -> Result<Store, ClinicError> {
        Store::open(&self.db_path)
    }

    /// The immutable doctor roster this deployment was configured with.
    pub fn roster(&self) -> &[Doctor] {
        &self.config.roster
    }

    // ── Patients ───────────────────────────────────────────────────────

    /// Validates and registers a new patient, returning its generated id.
    ///
    /// All four fields are required; the national id must be exactly 8
    /// digits, the phone at least 10 digits, and the birth date a real
    /// `YYYY-MM-DD` calendar date. Nothing is written unless every check
    /// passes.
    pub fn register_patient(
        &self,
        name: &str,
        national_id: &str,
        phone: &str,
        birth_date: &str,
    ) -> Result<String, ClinicError> {
        let name = name.trim();
        let national_id = national_id.trim();
        let phone = phone.trim();
        let birth_date = birth_date.trim();

        if name.is_empty() || national_id.is_empty() || phone.is_empty() || birth_date.is_empty() {
            return Err(ClinicError::validation("Complete all fields."));
        }
        if !validator::valid_national_id(national_id) {
            return Err(ClinicError::validation(
                "National ID must be exactly 8 digits.",
            ));
        }
        if !validator::valid_phone(phone) {
            return Err(ClinicError::validation(
                "Phone must have at least 10 digits.",
            ));
        }
        if !validator::valid_date(birth_date) {
            return Err(ClinicError::validation(
                "Date must be in YYYY-MM-DD format.",
            ));
        }

        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            national_id: national_id.to_string(),
            phone: phone.to_string(),
            birth_date: birth_date.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.open_store()?.insert_patient(&patient)?;
        Ok(patient.id)
    }

    /// All patients, sorted by name.
    pub fn list_patients(&self) -> Result<Vec<Patient>, ClinicError> {
        self.open_store()?.list_patients()
    }

    /// Patients matching `text` by substring on name or national id.
    pub fn search_patients(&self, text: &str) -> Result<Vec<Patient>, ClinicError> {
        self.open_store()?.search_patients(text.trim())
    }

    pub fn delete_patient(&self, id: &str) -> Result<(), ClinicError> {
        self.open_store()?.delete_patient(id)
    }

    // ── Appointments ───────────────────────────────────────────────────

    /// Books an appointment, resolving the doctor's display name from the
    /// roster by code. Fails with a conflict error when the slot
    /// (doctor, date, time) is already taken.
    pub fn schedule_appointment(&self, request: &BookingRequest) -> Result<String, ClinicError> {
        // Validate first so a malformed request never opens a store handle.
        let booking = scheduler::validate(&self.config.roster, request)?;
        let store = self.open_store()?;
        scheduler::book(&store, &booking)
    }

    /// All appointments, sorted by (date, time) ascending.
    pub fn list_appointments(&self) -> Result<Vec<Appointment>, ClinicError> {
        self.open_store()?.list_appointments()
    }

    pub fn delete_appointment(&self, id: &str) -> Result<(), ClinicError> {
        self.open_store()?.delete_appointment(id)
    }

    // ── Payments ───────────────────────────────────────────────────────

    /// Processes one mock payment attempt. `amount` is the raw decimal
    /// string as entered; it is converted to minor units before the
    /// method-specific authorization runs. Every attempt that passes
    /// validation writes exactly one payment row, whatever the outcome.
    pub fn pay(
        &self,
        patient_name: &str,
        amount: &str,
        method: &PaymentMethod,
    ) -> Result<PaymentReceipt, ClinicError> {
        if patient_name.trim().is_empty() || amount.trim().is_empty() {
            return Err(ClinicError::validation("Complete name and amount."));
        }
        let amount_cents = payments::parse_amount_cents(amount)?;
        let store = self.open_store()?;
        payments::process(&store, patient_name, amount_cents, method)
    }

    /// Full payment audit trail, newest first.
    pub fn list_payments(&self) -> Result<Vec<Payment>, ClinicError> {
        self.open_store()?.list_payments()
    }

    // ── Export ─────────────────────────────────────────────────────────

    /// Serializes a snapshot of all three record collections to `file_path`
    /// in the requested format (json, yaml, or toml; toml is the default).
    pub fn export_records(&self, file_path: &str, format: &str) -> Result<()> {
        use anyhow::Context;

        let store = self.open_store()?;
        let snapshot = RecordSnapshot {
            patients: store.list_patients()?,
            appointments: store.list_appointments()?,
            payments: store.list_payments()?,
        };

        let content = match format {
            "json" => {
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize to JSON")?
            }
            "yaml" => serde_yaml::to_string(&snapshot).context("Failed to serialize to YAML")?,
            _ => toml::to_string_pretty(&snapshot).context("Failed to serialize to TOML")?,
        };

        std::fs::write(file_path, content).context("Failed to write export file")?;

        Ok(())
    }
}

/// Everything the clinic has on record, in listing order.
#[derive(Debug, serde::Serialize)]
pub struct RecordSnapshot {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub payments: Vec<Payment>,
}
