use anyhow::Result;

use crate::builders::records::{Appointment, Patient, Payment, PaymentOutcome};
use crate::core::config::ClinicConfig;

/// Aggregate counts for the status report, computed by the caller from the
/// listed records.
#[derive(Debug)]
pub struct WorkspaceStatus {
    pub patient_count: usize,
    pub appointment_count: usize,
    pub payment_count: usize,
    pub approved_payments: usize,
    pub pending_payments: usize,
    pub declined_payments: usize,
}

impl WorkspaceStatus {
    pub fn from_records(
        patients: &[Patient],
        appointments: &[Appointment],
        payments: &[Payment],
    ) -> Self {
        let count_outcome = |o: PaymentOutcome| payments.iter().filter(|p| p.result == o).count();
        Self {
            patient_count: patients.len(),
            appointment_count: appointments.len(),
            payment_count: payments.len(),
            approved_payments: count_outcome(PaymentOutcome::Approved),
            pending_payments: count_outcome(PaymentOutcome::Pending),
            declined_payments: count_outcome(PaymentOutcome::Declined),
        }
    }
}

pub trait StatusReporter {
    fn generate_status_report(&self, config: &ClinicConfig, status: &WorkspaceStatus)
    -> Result<()>;
}

/// A concrete implementation of `StatusReporter` that prints the report to
/// the console. This is the primary reporter used by the `status` command.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Formats one patient listing line. In verbose mode the record id is
    /// included so it can be pasted into `remove-patient`.
    pub fn format_patient(&self, patient: &Patient, verbose: bool) -> String {
        if verbose {
            format!(
                "👤 {} | ID {} | phone {} | born {} [{}]",
                patient.name, patient.national_id, patient.phone, patient.birth_date, patient.id
            )
        } else {
            format!(
                "👤 {} | ID {} | phone {} | born {}",
                patient.name, patient.national_id, patient.phone, patient.birth_date
            )
        }
    }

    /// Formats one appointment listing line, date and time first since the
    /// listing is sorted by them.
    pub fn format_appointment(&self, appt: &Appointment, verbose: bool) -> String {
        if verbose {
            format!(
                "📅 {} {} | {} | {} [{}]",
                appt.date, appt.time, appt.doctor_name, appt.patient_name, appt.id
            )
        } else {
            format!(
                "📅 {} {} | {} | {}",
                appt.date, appt.time, appt.doctor_name, appt.patient_name
            )
        }
    }

    /// Formats one payment listing line with the amount restored to major
    /// currency units for display.
    pub fn format_payment(&self, payment: &Payment) -> String {
        let icon = match payment.result {
            PaymentOutcome::Approved => "🟢",
            PaymentOutcome::Pending => "🟡",
            PaymentOutcome::Declined => "🔴",
        };
        format!(
            "{} {} | {} {:.2} | {} | {} | ref {}",
            icon,
            payment.created_at,
            payment.patient_name,
            payment.amount_cents as f64 / 100.0,
            payment.method,
            payment.result,
            payment.reference
        )
    }
}

impl StatusReporter for ConsoleReporter {
    /// Generates and prints the full status report to the standard output.
    fn generate_status_report(
        &self,
        config: &ClinicConfig,
        status: &WorkspaceStatus,
    ) -> Result<()> {
        println!("📊 Clinic Workspace Status");
        println!("==========================");

        println!("\n🩺 Doctor roster ({} doctors):", config.roster.len());
        for doctor in &config.roster {
            println!("  {}  {}", doctor.code, doctor.name);
        }

        println!("\n📈 Records:");
        println!("  Patients: {}", status.patient_count);
        println!("  Appointments: {}", status.appointment_count);
        println!(
            "  Payments: {} ({} approved, {} pending, {} declined)",
            status.payment_count,
            status.approved_payments,
            status.pending_payments,
            status.declined_payments
        );

        if status.pending_payments > 0 {
            println!("\n⚠️  Pending transfers need manual reconciliation");
        }

        Ok(())
    }
}
