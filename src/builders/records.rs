use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered patient as stored in the `patients` table.
///
/// Patients are created by registration and deleted by explicit id; they are
/// never mutated. The struct is a transient copy of the stored row — the
/// store owns the durable record.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Patient {
    /// Unique identifier, a v4 UUID generated at registration.
    pub id: String,
    /// Patient's full name, non-empty.
    pub name: String,
    /// Exactly 8 ASCII digits.
    pub national_id: String,
    /// At least 10 ASCII digits.
    pub phone: String,
    /// Birth date in `YYYY-MM-DD` form.
    pub birth_date: String,
    /// ISO-8601 UTC creation timestamp, assigned by the engine.
    pub created_at: String,
}

/// A booked appointment as stored in the `appointments` table.
///
/// The slot (doctor_id, date, time) is unique across the table; the store
/// enforces this with a uniqueness constraint and the scheduler maps a
/// violation to a conflict error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Appointment {
    pub id: String,
    /// Optional weak reference to a registered patient. Appointments may be
    /// booked for walk-ins that were never registered. Skipped when absent
    /// so the TOML export stays representable.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient_id: Option<String>,
    /// Denormalized patient name captured at booking time.
    pub patient_name: String,
    /// Roster code of the doctor (e.g. "D01").
    pub doctor_id: String,
    /// Denormalized doctor display name captured at booking time.
    pub doctor_name: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour clock, minute resolution.
    pub time: String,
    pub created_at: String,
}

/// A processed payment attempt as stored in the `payments` table.
///
/// Payments are immutable once created and never deleted. One row is written
/// per attempt that passes method validation, whether the outcome was
/// approved, declined, or pending.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Payment {
    pub id: String,
    pub patient_name: String,
    /// Amount in minor currency units (cents), always non-negative.
    pub amount_cents: i64,
    /// Which mock authorization strategy handled the attempt.
    pub method: PaymentKind,
    /// Terminal outcome of the attempt.
    pub result: PaymentOutcome,
    /// Opaque, method-prefixed reference string (e.g. `CC-SUCC-...`).
    pub reference: String,
    pub created_at: String,
}

/// The supported mock payment methods.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Card,
    PayPal,
    Transfer,
}

/// Terminal states of a payment attempt. There are no retries and no partial
/// states: every attempt that passes validation lands on exactly one of
/// these.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined,
    Pending,
}

/// Provides the storage/display representation for each payment method.
impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentKind::Card => write!(f, "CARD"),
            PaymentKind::PayPal => write!(f, "PAYPAL"),
            PaymentKind::Transfer => write!(f, "TRANSFER"),
        }
    }
}

impl PaymentKind {
    /// Parses the storage representation written by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CARD" => Some(PaymentKind::Card),
            "PAYPAL" => Some(PaymentKind::PayPal),
            "TRANSFER" => Some(PaymentKind::Transfer),
            _ => None,
        }
    }
}

/// Provides the storage/display representation for each outcome.
impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentOutcome::Approved => write!(f, "approved"),
            PaymentOutcome::Declined => write!(f, "declined"),
            PaymentOutcome::Pending => write!(f, "pending"),
        }
    }
}

impl PaymentOutcome {
    /// Parses the storage representation written by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(PaymentOutcome::Approved),
            "declined" => Some(PaymentOutcome::Declined),
            "pending" => Some(PaymentOutcome::Pending),
            _ => None,
        }
    }
}

/// The method-specific fields of a payment request, captured from the form.
///
/// One tagged union covers all three mock processors; `payments::process`
/// dispatches on the variant, so no strategy hierarchy is needed.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    Card {
        number: String,
        /// Expiry month as entered. Captured but not range-validated; the
        /// business rule does not gate approval on expiry.
        exp_month: String,
        /// Expiry year as entered, same caveat as `exp_month`.
        exp_year: String,
        cvc: String,
    },
    PayPal {
        email: String,
    },
    Transfer {
        /// Caller-supplied bank reference, minimum 5 characters.
        reference: String,
    },
}

impl PaymentMethod {
    /// The kind recorded in the payments table for this request.
    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentMethod::Card { .. } => PaymentKind::Card,
            PaymentMethod::PayPal { .. } => PaymentKind::PayPal,
            PaymentMethod::Transfer { .. } => PaymentKind::Transfer,
        }
    }
}

/// What `pay` hands back to the caller once the attempt has been recorded.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub outcome: PaymentOutcome,
    pub reference: String,
}
