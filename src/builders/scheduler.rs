use chrono::Utc;
use uuid::Uuid;

use crate::builders::records::Appointment;
use crate::builders::validator;
use crate::core::config::Doctor;
use crate::core::error::ClinicError;
use crate::core::store::{Store, is_constraint_violation};

/// A proposed booking, fields as captured from the form. All fields are
/// trimmed before validation so stray whitespace never creates a distinct
/// slot.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub patient_name: String,
    /// Optional weak reference to a registered patient.
    pub patient_id: Option<String>,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
}

/// A booking that passed field validation: trimmed fields plus the roster
/// doctor resolved by code. Only validated bookings reach the store.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub patient_name: String,
    pub patient_id: Option<String>,
    pub doctor: Doctor,
    pub date: String,
    pub time: String,
}

/// Syntax-validates a booking request against the roster.
///
/// Pure: no store access. Order of checks matters — missing fields first,
/// then date format, then time format, then roster membership — so the
/// caller always sees the earliest applicable validation failure before any
/// conflict decision is attempted.
pub fn validate(roster: &[Doctor], request: &BookingRequest)
-> Result<ValidatedBooking, ClinicError> {
    let patient_name = request.patient_name.trim();
    let doctor_id = request.doctor_id.trim();
    let date = request.date.trim();
    let time = request.time.trim();

    if patient_name.is_empty() || doctor_id.is_empty() || date.is_empty() || time.is_empty() {
        return Err(ClinicError::validation("Complete all fields."));
    }
    if !validator::valid_date(date) {
        return Err(ClinicError::validation(
            "Date must be in YYYY-MM-DD format.",
        ));
    }
    if !validator::valid_time(time) {
        return Err(ClinicError::validation(
            "Time must be in HH:MM (24h) format.",
        ));
    }

    let doctor = roster
        .iter()
        .find(|d| d.code == doctor_id)
        .ok_or_else(|| ClinicError::Validation(format!("Unknown doctor code: {doctor_id}")))?;

    Ok(ValidatedBooking {
        patient_name: patient_name.to_string(),
        patient_id: request
            .patient_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        doctor: doctor.clone(),
        date: date.to_string(),
        time: time.to_string(),
    })
}

/// Books a validated appointment, returning its generated id.
///
/// The conflict decision is not a read-then-insert: the insert relies on the
/// store's uniqueness constraint over (doctor_id, date, time), and a
/// constraint violation is mapped to `ClinicError::Conflict` naming the
/// doctor, date, and time. That keeps the check atomic even if a second
/// operator ever runs concurrently.
pub fn book(store: &Store, booking: &ValidatedBooking) -> Result<String, ClinicError> {
    let appointment = Appointment {
        id: Uuid::new_v4().to_string(),
        patient_id: booking.patient_id.clone(),
        patient_name: booking.patient_name.clone(),
        doctor_id: booking.doctor.code.clone(),
        doctor_name: booking.doctor.name.clone(),
        date: booking.date.clone(),
        time: booking.time.clone(),
        created_at: Utc::now().to_rfc3339(),
    };

    match store.insert_appointment(&appointment) {
        Ok(()) => Ok(appointment.id),
        Err(e) if is_constraint_violation(&e) => Err(ClinicError::Conflict(format!(
            "{} already has an appointment at {} on {}.",
            booking.doctor.name, booking.time, booking.date
        ))),
        Err(e) => Err(e.into()),
    }
}
