use rusqlite::{Connection, params};
use std::path::Path;

use crate::builders::records::{Appointment, Patient, Payment, PaymentKind, PaymentOutcome};
use crate::core::error::ClinicError;

/// A scoped handle on the clinic database.
///
/// Every engine operation opens a `Store`, runs its handful of statements,
/// and drops it before returning, so the connection is released on every exit
/// path. The schema is bootstrapped on open with `CREATE TABLE IF NOT
/// EXISTS`, which makes opening a fresh database file and opening an existing
/// one the same operation.
///
/// The `appointments` table carries a uniqueness constraint on
/// `(doctor_id, date, time)`. That constraint — not an application-level
/// pre-check — is the single source of truth for slot conflicts: the
/// scheduler inserts unconditionally and maps a constraint violation to a
/// conflict error.
pub struct Store {
    conn: Connection,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    national_id TEXT NOT NULL,
    phone       TEXT NOT NULL,
    birth_date  TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS appointments (
    id           TEXT PRIMARY KEY,
    patient_id   TEXT,
    patient_name TEXT NOT NULL,
    doctor_id    TEXT NOT NULL,
    doctor_name  TEXT NOT NULL,
    date         TEXT NOT NULL,
    time         TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    UNIQUE (doctor_id, date, time)
);
CREATE TABLE IF NOT EXISTS payments (
    id           TEXT PRIMARY KEY,
    patient_name TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    method       TEXT NOT NULL,
    result       TEXT NOT NULL,
    reference    TEXT NOT NULL,
    created_at   TEXT NOT NULL
);
";

impl Store {
    /// Opens (creating if necessary) the database at `path` and ensures the
    /// three record tables exist.
    pub fn open(path: &Path) -> Result<Self, ClinicError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // ── Patients ───────────────────────────────────────────────────────

    pub fn insert_patient(&self, patient: &Patient) -> Result<(), ClinicError> {
        self.conn.execute(
            "INSERT INTO patients (id, name, national_id, phone, birth_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                patient.id,
                patient.name,
                patient.national_id,
                patient.phone,
                patient.birth_date,
                patient.created_at,
            ],
        )?;
        Ok(())
    }

    /// All patients, sorted by name. This ordering is a read-side contract;
    /// rows are stored in insertion order.
    pub fn list_patients(&self) -> Result<Vec<Patient>, ClinicError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, national_id, phone, birth_date, created_at
             FROM patients ORDER BY name",
        )?;
        let rows = stmt.query_map([], patient_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Patients whose name or national id contains `text`, sorted by name.
    pub fn search_patients(&self, text: &str) -> Result<Vec<Patient>, ClinicError> {
        let needle = format!("%{text}%");
        let mut stmt = self.conn.prepare(
            "SELECT id, name, national_id, phone, birth_date, created_at
             FROM patients
             WHERE name LIKE ?1 OR national_id LIKE ?1
             ORDER BY name",
        )?;
        let rows = stmt.query_map(params![needle], patient_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_patient(&self, id: &str) -> Result<(), ClinicError> {
        self.conn
            .execute("DELETE FROM patients WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Appointments ───────────────────────────────────────────────────

    /// Inserts an appointment row. A uniqueness-constraint violation means
    /// the slot is taken; the raw error is returned for the scheduler to map,
    /// since only the scheduler knows the doctor's display name for the
    /// conflict message.
    pub fn insert_appointment(&self, appt: &Appointment) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO appointments
                 (id, patient_id, patient_name, doctor_id, doctor_name, date, time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                appt.id,
                appt.patient_id,
                appt.patient_name,
                appt.doctor_id,
                appt.doctor_name,
                appt.date,
                appt.time,
                appt.created_at,
            ],
        )?;
        Ok(())
    }

    /// All appointments, sorted by (date, time) ascending.
    pub fn list_appointments(&self) -> Result<Vec<Appointment>, ClinicError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, patient_id, patient_name, doctor_id, doctor_name, date, time, created_at
             FROM appointments ORDER BY date, time",
        )?;
        let rows = stmt.query_map([], appointment_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_appointment(&self, id: &str) -> Result<(), ClinicError> {
        self.conn
            .execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Payments ───────────────────────────────────────────────────────

    pub fn insert_payment(&self, payment: &Payment) -> Result<(), ClinicError> {
        self.conn.execute(
            "INSERT INTO payments
                 (id, patient_name, amount_cents, method, result, reference, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                payment.id,
                payment.patient_name,
                payment.amount_cents,
                payment.method.to_string(),
                payment.result.to_string(),
                payment.reference,
                payment.created_at,
            ],
        )?;
        Ok(())
    }

    /// All payments, newest first. Payments are never deleted, so this is
    /// the full audit trail of attempts.
    pub fn list_payments(&self) -> Result<Vec<Payment>, ClinicError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, patient_name, amount_cents, method, result, reference, created_at
             FROM payments ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], payment_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        phone: row.get(3)?,
        birth_date: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        patient_name: row.get(2)?,
        doctor_id: row.get(3)?,
        doctor_name: row.get(4)?,
        date: row.get(5)?,
        time: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn payment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    let method_text: String = row.get(3)?;
    let result_text: String = row.get(4)?;
    let method = PaymentKind::parse(&method_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown payment method: {method_text}").into(),
        )
    })?;
    let result = PaymentOutcome::parse(&result_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown payment result: {result_text}").into(),
        )
    })?;
    Ok(Payment {
        id: row.get(0)?,
        patient_name: row.get(1)?,
        amount_cents: row.get(2)?,
        method,
        result,
        reference: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// True when an insert failed because a uniqueness constraint fired, as
/// opposed to the store being broken.
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
